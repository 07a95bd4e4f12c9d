//! Route definitions for the `/files` resource (admin only).

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// The upload route lifts axum's default body limit; the handler enforces
/// the configured upload size while streaming the field.
///
/// ```text
/// DELETE /          -> delete_file (?path=)
/// GET    /gallery   -> list_files (?type=)
/// GET    /analyze   -> analyze_files
/// POST   /upload    -> upload_file (multipart `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(files::delete_file))
        .route("/gallery", get(files::list_files))
        .route("/analyze", get(files::analyze_files))
        .route(
            "/upload",
            post(files::upload_file).layer(DefaultBodyLimit::disable()),
        )
}
