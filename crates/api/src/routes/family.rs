//! Route definitions for the `/family` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::family;
use crate::state::AppState;

/// Routes mounted at `/family`.
///
/// ```text
/// GET    /          -> list_members
/// POST   /          -> create_member (admin)
/// GET    /tree      -> get_tree
/// GET    /{id}      -> get_member
/// PUT    /{id}      -> update_member (admin)
/// DELETE /{id}      -> delete_member (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(family::list_members).post(family::create_member))
        .route("/tree", get(family::get_tree))
        .route(
            "/{id}",
            get(family::get_member)
                .put(family::update_member)
                .delete(family::delete_member),
        )
}
