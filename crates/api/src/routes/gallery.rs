//! Route definitions for the `/gallery` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /          -> list_items (?category=&tag=&status=&featured=)
/// POST   /          -> create_item (admin)
/// PUT    /{id}      -> update_item (admin)
/// DELETE /{id}      -> delete_item (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_items).post(gallery::create_item))
        .route("/{id}", put(gallery::update_item).delete(gallery::delete_item))
}
