//! Route definitions for the `/reunions` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::reunions;
use crate::state::AppState;

/// Routes mounted at `/reunions`.
///
/// ```text
/// GET    /          -> list_reunions
/// POST   /          -> create_reunion (admin)
/// PUT    /{id}      -> replace_reunion (admin)
/// DELETE /{id}      -> delete_reunion (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reunions::list_reunions).post(reunions::create_reunion),
        )
        .route(
            "/{id}",
            put(reunions::replace_reunion).delete(reunions::delete_reunion),
        )
}
