//! Animal record store boundary.
//!
//! This module defines a storage-facing abstraction over the animal
//! collection without making any storage assumptions.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAnimalStore;
pub use postgres::PostgresAnimalStore;
pub use r#trait::{AnimalStore, StoreError};
