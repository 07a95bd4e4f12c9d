//! Route definitions for the `/organization` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::organization;
use crate::state::AppState;

/// Routes mounted at `/organization`.
///
/// ```text
/// GET    /          -> list_members
/// POST   /          -> create_member (admin)
/// PUT    /{id}      -> update_member (admin)
/// DELETE /{id}      -> delete_member (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(organization::list_members).post(organization::create_member),
        )
        .route(
            "/{id}",
            put(organization::update_member).delete(organization::delete_member),
        )
}
