//! Form DTOs and field coercion.

use serde::Deserialize;

use fauna_core::AnimalDraft;

/// URL-encoded body of the create and edit forms.
///
/// Missing fields default rather than fail; the only interpretation applied
/// is the `extinct` checkbox coercion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalForm {
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub location: String,
    /// Raw checkbox value; see [`coerce_extinct`].
    pub extinct: Option<String>,
    #[serde(default)]
    pub life_expectancy: f64,
}

impl AnimalForm {
    pub fn into_draft(self) -> AnimalDraft {
        AnimalDraft {
            species: self.species,
            location: self.location,
            extinct: coerce_extinct(self.extinct.as_deref()),
            life_expectancy: self.life_expectancy,
        }
    }
}

/// HTML checkbox semantics: a checked box submits the literal `on`.
///
/// Anything else, including the string `true`, means unchecked. Known quirk,
/// kept for wire compatibility with existing forms.
pub fn coerce_extinct(raw: Option<&str>) -> bool {
    raw == Some("on")
}
