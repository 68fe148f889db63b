use std::sync::Arc;

use fauna_store::AnimalStore;

use crate::render::{HtmlRenderer, Renderer};

/// Shared per-process services handed to every handler.
///
/// Constructed once at startup and passed down via `Extension`; there are no
/// ambient globals.
pub struct AppServices {
    pub store: Arc<dyn AnimalStore>,
    pub renderer: Arc<dyn Renderer>,
}

/// Wire up the default service set: the given store plus HTML rendering.
pub fn build_services(store: Arc<dyn AnimalStore>) -> AppServices {
    AppServices {
        store,
        renderer: Arc::new(HtmlRenderer),
    }
}
