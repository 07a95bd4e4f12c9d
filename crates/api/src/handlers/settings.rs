//! Handlers for `/settings`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_store::models::settings::{
    redact_secrets, SiteSettings, KEY_ADMIN_PASSWORD, SECTION_GENERAL,
};
use kinfolk_store::repositories::SettingsRepo;
use serde_json::Value;

use crate::auth::password::{hash_password, is_hashed};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// The settings object, `{}` before the first save. The admin password is
/// never included.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut settings = SettingsRepo::get(&state.store).await?.unwrap_or_default();
    redact_secrets(&mut settings);
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
///
/// Shallow merge: every top-level section in the body replaces the stored
/// one. A plaintext admin password in the body is hashed before saving.
pub async fn save_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut patch): Json<SiteSettings>,
) -> AppResult<impl IntoResponse> {
    if let Some(Value::Object(general)) = patch.get_mut(SECTION_GENERAL) {
        if let Some(Value::String(password)) = general.get_mut(KEY_ADMIN_PASSWORD) {
            if !password.is_empty() && !is_hashed(password) {
                *password = hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            }
        }
    }

    let mut saved = SettingsRepo::save(&state.store, patch).await?;
    tracing::info!(email = %admin.email, "Settings saved");

    redact_secrets(&mut saved);
    Ok(Json(DataResponse { data: saved }))
}
