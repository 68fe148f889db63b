use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::AnimalId;

/// The four client-settable fields of an animal record.
///
/// This is what forms submit and what a replace writes; the store pairs it
/// with an [`AnimalId`] to produce an [`Animal`]. No field is validated:
/// empty labels and zero life expectancies are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDraft {
    pub species: String,
    pub location: String,
    pub extinct: bool,
    /// Expected lifespan in years.
    pub life_expectancy: f64,
}

/// Animal record: a draft plus its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    #[serde(flatten)]
    pub fields: AnimalDraft,
}

impl Animal {
    pub fn new(id: AnimalId, fields: AnimalDraft) -> Self {
        Self { id, fields }
    }
}

impl Entity for Animal {
    type Id = AnimalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
