//! `fauna-store` — persistence for animal records.
//!
//! The record store is a capability boundary: handlers program against the
//! [`AnimalStore`] trait and never see the backing storage. Two backends are
//! provided: an in-memory store (tests/dev) and a Postgres-backed document
//! store (production).

pub mod animal_store;

pub use animal_store::{AnimalStore, InMemoryAnimalStore, PostgresAnimalStore, StoreError};
