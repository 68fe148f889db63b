//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: shared service wiring (store + renderer)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: form DTOs and field coercion
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use fauna_store::AnimalStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: Arc<dyn AnimalStore>) -> Router {
    let services = Arc::new(services::build_services(store));

    let routed = Router::new()
        .route("/", get(routes::system::liveness))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(Extension(services)),
        );

    // `method_override` must run *before* method dispatch: `Router::layer`
    // pushes middleware inside each `MethodRouter` (past the 405 check), so the
    // rewrite is wrapped around the whole routing router via a fallback.
    Router::new()
        .fallback_service(routed)
        .layer(axum::middleware::from_fn(middleware::method_override))
}
