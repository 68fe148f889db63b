//! Consistent error responses.
//!
//! Single top-level fallback: any store or render failure maps to a generic
//! 500. Nothing is translated into a domain-specific user-facing message.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fauna_store::StoreError;

use crate::render::RenderError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store operation failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        err.to_string(),
    )
}

pub fn render_error_to_response(err: RenderError) -> axum::response::Response {
    tracing::error!(error = %err, "view rendering failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "render_error",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
