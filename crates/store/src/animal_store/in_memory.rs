use std::sync::RwLock;

use async_trait::async_trait;

use fauna_core::{Animal, AnimalDraft, AnimalId};

use super::r#trait::{AnimalStore, StoreError};

/// In-memory animal store.
///
/// Intended for tests/dev. Keeps records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryAnimalStore {
    records: RwLock<Vec<Animal>>,
}

impl InMemoryAnimalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnimalStore for InMemoryAnimalStore {
    async fn insert(&self, draft: AnimalDraft) -> Result<Animal, StoreError> {
        let animal = Animal::new(AnimalId::new(), draft);

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        records.push(animal.clone());

        Ok(animal)
    }

    async fn insert_many(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let animal = Animal::new(AnimalId::new(), draft);
            records.push(animal.clone());
            created.push(animal);
        }

        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Animal>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records.clone())
    }

    async fn find_by_id(&self, id: AnimalId) -> Result<Option<Animal>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records.iter().find(|a| a.id == id).cloned())
    }

    async fn replace(&self, id: AnimalId, draft: AnimalDraft) -> Result<Option<Animal>, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        match records.iter_mut().find(|a| a.id == id) {
            Some(existing) => {
                existing.fields = draft;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: AnimalId) -> Result<bool, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        match records.iter().position(|a| a.id == id) {
            Some(idx) => {
                records.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let removed = records.len() as u64;
        records.clear();

        Ok(removed)
    }
}
