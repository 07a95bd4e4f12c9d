//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_core::roles::ROLE_ADMIN;
use kinfolk_store::repositories::SettingsRepo;
use serde::{Deserialize, Serialize};

use crate::auth::admin::AdminCredentials;
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. The login form posts the email as
/// `username`, so both names are accepted.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the admin credential and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let settings = SettingsRepo::get(&state.store).await?;
    let admin = AdminCredentials::resolve(settings.as_ref(), &state.config.admin);

    let valid = admin
        .matches(&input.email, &input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!(email = %input.email, "Rejected login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = generate_access_token(&admin.email, ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(email = %admin.email, "Admin logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            name: "Admin".to_string(),
            email: admin.email,
            role: ROLE_ADMIN.to_string(),
        },
    }))
}
