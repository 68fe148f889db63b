//! Request middleware: method override and request logging.

use axum::body::Body;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Rewrite the request method from a `_method` query parameter.
///
/// HTML forms can only submit GET and POST; edit and delete forms post to
/// `...?_method=PUT` / `...?_method=DELETE` and this middleware rewrites the
/// method before routing dispatches on it. Only PUT and DELETE are honored,
/// and only on POST requests.
pub async fn method_override(mut req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(target) = override_from_query(req.uri().query()) {
            *req.method_mut() = target;
        }
    }

    next.run(req).await
}

fn override_from_query(query: Option<&str>) -> Option<Method> {
    let raw = query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "_method").then_some(value)
    })?;

    match raw.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Emit one log line per request: method, path, response status.
pub async fn request_log(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}
