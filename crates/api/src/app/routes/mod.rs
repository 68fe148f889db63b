use axum::Router;

pub mod animals;
pub mod system;

/// Router for the animal collection endpoints.
pub fn router() -> Router {
    Router::new().merge(animals::router())
}
