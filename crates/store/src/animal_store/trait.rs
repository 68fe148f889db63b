use async_trait::async_trait;
use thiserror::Error;

use fauna_core::{Animal, AnimalDraft, AnimalId};

/// Record store operation error.
///
/// These are **infrastructure errors** (connectivity, queries, undecodable
/// documents). "Record missing" is not an error at this layer: lookups return
/// `Option` and removals report whether anything was removed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or is shutting down.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A query against the backing store failed.
    #[error("query failed: {0}")]
    Query(String),

    /// A stored document could not be encoded or decoded.
    #[error("invalid document: {0}")]
    Document(String),
}

/// Document-style store for the animal collection.
///
/// ## Semantics
///
/// - Identifiers are assigned by the store on insert and never reused.
/// - `replace` overwrites the full document (no partial patching).
/// - `find_all` returns records in insertion order.
///
/// ## Implementation Requirements
///
/// Implementations must be safe to share across request handlers
/// (`Send + Sync`); callers perform no cross-request coordination on top.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Insert one record, assigning it a fresh id.
    async fn insert(&self, draft: AnimalDraft) -> Result<Animal, StoreError>;

    /// Insert a batch of records, preserving order.
    async fn insert_many(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, StoreError>;

    /// Every record in the collection, in insertion order.
    async fn find_all(&self) -> Result<Vec<Animal>, StoreError>;

    /// Look up one record by id.
    async fn find_by_id(&self, id: AnimalId) -> Result<Option<Animal>, StoreError>;

    /// Replace the full document for `id`.
    ///
    /// Returns the record as stored, or `None` when no record with that id
    /// exists (no upsert).
    async fn replace(&self, id: AnimalId, draft: AnimalDraft) -> Result<Option<Animal>, StoreError>;

    /// Delete the record for `id`, reporting whether one existed.
    async fn delete(&self, id: AnimalId) -> Result<bool, StoreError>;

    /// Delete every record, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
