//! Postgres-backed animal store.
//!
//! Each animal is persisted as a JSONB document keyed by its UUID; the table
//! keeps an insert timestamp so listings come back in insertion order. The
//! schema is prepared at startup by [`PostgresAnimalStore::ensure_schema`].
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to [`StoreError`] as follows:
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | PoolClosed / PoolTimedOut / Io | `Unavailable` | Connection-level failure |
//! | ColumnDecode / Decode | `Document` | Stored document did not decode |
//! | Other | `Query` | Query execution failed |
//!
//! ## Thread Safety
//!
//! `PostgresAnimalStore` is `Send + Sync`; all operations go through the
//! SQLx connection pool, which handles thread-safe connection management.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use fauna_core::{Animal, AnimalDraft, AnimalId};

use super::r#trait::{AnimalStore, StoreError};

/// Postgres-backed document store for animal records.
#[derive(Debug, Clone)]
pub struct PostgresAnimalStore {
    pool: Arc<PgPool>,
}

impl PostgresAnimalStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `animals` table when missing.
    ///
    /// Run once at startup, before serving requests.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS animals (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }

    fn decode_row(row: &PgRow) -> Result<Animal, StoreError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| StoreError::Document(format!("animal row missing id: {e}")))?;
        let doc: serde_json::Value = row
            .try_get("doc")
            .map_err(|e| StoreError::Document(format!("animal row missing doc: {e}")))?;

        let fields: AnimalDraft = serde_json::from_value(doc)
            .map_err(|e| StoreError::Document(format!("undecodable animal document: {e}")))?;

        Ok(Animal::new(AnimalId::from_uuid(id), fields))
    }
}

fn encode_doc(draft: &AnimalDraft) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(draft)
        .map_err(|e| StoreError::Document(format!("document serialization failed: {e}")))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Document(format!("{operation}: {err}"))
        }
        other => StoreError::Query(format!("{operation}: {other}")),
    }
}

#[async_trait]
impl AnimalStore for PostgresAnimalStore {
    #[instrument(skip(self, draft), err)]
    async fn insert(&self, draft: AnimalDraft) -> Result<Animal, StoreError> {
        let id = AnimalId::new();
        let doc = encode_doc(&draft)?;

        sqlx::query("INSERT INTO animals (id, doc) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(&doc)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(Animal::new(id, draft))
    }

    #[instrument(skip(self, drafts), fields(count = drafts.len()), err)]
    async fn insert_many(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, StoreError> {
        // One statement per record; callers don't require batch atomicity.
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.insert(draft).await?);
        }

        Ok(created)
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Animal>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, doc
            FROM animals
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(Self::decode_row).collect()
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn find_by_id(&self, id: AnimalId) -> Result<Option<Animal>, StoreError> {
        let row = sqlx::query("SELECT id, doc FROM animals WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(Self::decode_row).transpose()
    }

    #[instrument(skip(self, draft), fields(id = %id), err)]
    async fn replace(&self, id: AnimalId, draft: AnimalDraft) -> Result<Option<Animal>, StoreError> {
        let doc = encode_doc(&draft)?;

        let row = sqlx::query(
            r#"
            UPDATE animals
            SET doc = $2
            WHERE id = $1
            RETURNING id, doc
            "#,
        )
        .bind(id.as_uuid())
        .bind(&doc)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace", e))?;

        row.as_ref().map(Self::decode_row).transpose()
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: AnimalId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM animals")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_all", e))?;

        Ok(result.rows_affected())
    }
}
