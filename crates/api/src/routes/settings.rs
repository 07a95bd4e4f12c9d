use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /          -> get_settings
/// PUT    /          -> save_settings (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(settings::get_settings).put(settings::save_settings))
}
