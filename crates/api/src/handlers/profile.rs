//! Handler for `/profile`: the admin's own account details.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::settings::{
    general_str, SiteSettings, KEY_ADMIN_AVATAR, KEY_ADMIN_EMAIL, KEY_ADMIN_PASSWORD,
    KEY_ADMIN_PHONE, KEY_ADMIN_USERNAME, SECTION_GENERAL,
};
use kinfolk_store::repositories::SettingsRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::admin::AdminCredentials;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /profile`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl Profile {
    fn from_settings(settings: &SiteSettings) -> Self {
        let field = |key| general_str(settings, key).map(str::to_string);
        Self {
            username: field(KEY_ADMIN_USERNAME),
            email: field(KEY_ADMIN_EMAIL),
            phone: field(KEY_ADMIN_PHONE),
            avatar: field(KEY_ADMIN_AVATAR),
        }
    }
}

/// PUT /api/v1/profile
///
/// Update the admin's display details. Changing the password requires the
/// current one; the new password is stored as an Argon2id hash.
pub async fn update_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let mut values = SiteSettings::new();

    if let Some(new_password) = input.new_password.as_deref().filter(|p| !p.is_empty()) {
        let settings = SettingsRepo::get(&state.store).await?;
        let current = AdminCredentials::resolve(settings.as_ref(), &state.config.admin);
        let supplied = input.current_password.as_deref().unwrap_or_default();

        let valid = current
            .matches(&current.email, supplied)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !valid {
            return Err(AppError::Core(CoreError::Validation(
                "Current password is incorrect".into(),
            )));
        }
        validate_password_strength(new_password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let hash = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        values.insert(KEY_ADMIN_PASSWORD.into(), Value::String(hash));
    }

    if let Some(email) = input.email.as_deref().map(str::trim) {
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Core(CoreError::Validation(
                "A valid email is required".into(),
            )));
        }
        values.insert(KEY_ADMIN_EMAIL.into(), Value::String(email.to_string()));
    }
    for (key, value) in [
        (KEY_ADMIN_USERNAME, input.username),
        (KEY_ADMIN_PHONE, input.phone),
        (KEY_ADMIN_AVATAR, input.avatar),
    ] {
        if let Some(value) = value {
            values.insert(key.into(), Value::String(value));
        }
    }

    let password_changed = values.contains_key(KEY_ADMIN_PASSWORD);
    let saved = SettingsRepo::set_in_section(&state.store, SECTION_GENERAL, values).await?;
    tracing::info!(email = %admin.email, password_changed, "Admin profile updated");

    Ok(Json(DataResponse {
        data: Profile::from_settings(&saved),
    }))
}
