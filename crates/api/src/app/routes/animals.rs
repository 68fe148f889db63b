use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Form, Json, Router,
};

use fauna_core::{AnimalDraft, AnimalId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::render::View;

pub fn router() -> Router {
    Router::new()
        .route("/animals", get(index).post(create))
        .route("/animals/initialize", get(initialize))
        .route("/animals/new", get(new_form))
        .route("/animals/:id", get(show).put(update).delete(destroy))
        .route("/animals/:id/edit", get(edit_form))
}

/// The fixed records `initialize` resets the collection to.
fn seed_set() -> Vec<AnimalDraft> {
    vec![
        AnimalDraft {
            species: "Tiger".to_string(),
            location: "Asia".to_string(),
            extinct: false,
            life_expectancy: 15.0,
        },
        AnimalDraft {
            species: "Elephant".to_string(),
            location: "Africa".to_string(),
            extinct: false,
            life_expectancy: 60.0,
        },
        AnimalDraft {
            species: "Panda".to_string(),
            location: "China".to_string(),
            extinct: false,
            life_expectancy: 20.0,
        },
    ]
}

/// Destructive reset behind a GET. Kept as GET for compatibility with the
/// existing wire contract, not because it is good HTTP.
pub async fn initialize(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    if let Err(e) = services.store.delete_all().await {
        return errors::store_error_to_response(e);
    }

    match services.store.insert_many(seed_set()).await {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn index(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store.find_all().await {
        Ok(animals) => render(&services, View::Index { animals }),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn new_form(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    render(&services, View::New)
}

pub async fn show(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store.find_by_id(id).await {
        Ok(Some(animal)) => render(&services, View::Show { animal }),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "animal not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn edit_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store.find_by_id(id).await {
        Ok(Some(animal)) => render(&services, View::Edit { animal }),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "animal not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<dto::AnimalForm>,
) -> axum::response::Response {
    match services.store.insert(form.into_draft()).await {
        Ok(_) => Redirect::to("/animals").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Full replacement of the four fields. Fire-and-forget: redirects even when
/// the id matches nothing.
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(form): Form<dto::AnimalForm>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store.replace(id, form.into_draft()).await {
        Ok(_) => Redirect::to("/animals").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Removes the record; redirects whether or not anything existed.
pub async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store.delete(id).await {
        Ok(_) => Redirect::to("/animals").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

fn parse_id(raw: &str) -> Result<AnimalId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid animal id")
    })
}

fn render(services: &AppServices, view: View) -> axum::response::Response {
    match services.renderer.render(&view) {
        Ok(body) => Html(body).into_response(),
        Err(e) => errors::render_error_to_response(e),
    }
}
