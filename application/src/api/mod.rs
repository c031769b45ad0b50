//! HTTP API definitions.

pub mod inquiry;
pub mod property;

use std::path::PathBuf;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

/// Returns the [`Router`] of the HTTP API.
///
/// The provided `static_dir` is served under the `/static` URL prefix,
/// uploaded media included.
pub fn router(static_dir: PathBuf) -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(property::list).post(property::create),
        )
        .route(
            "/api/properties/:id",
            get(property::by_id)
                .put(property::update)
                .delete(property::delete),
        )
        .route("/api/tasaciones", post(inquiry::submit_appraisal))
        .route("/api/contacto", post(inquiry::submit_contact))
        .route("/api/clients", get(inquiry::list))
        .route("/api/clients/:id", delete(inquiry::delete))
        .nest_service("/static", ServeDir::new(static_dir))
}
