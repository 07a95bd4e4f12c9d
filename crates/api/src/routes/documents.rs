//! Route definitions for the `/documents` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET    /          -> list_documents
/// POST   /          -> create_document (admin)
/// PUT    /{id}      -> update_document (admin)
/// DELETE /{id}      -> delete_document (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/{id}",
            put(documents::update_document).delete(documents::delete_document),
        )
}
