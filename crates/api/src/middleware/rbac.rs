//! Role gate for admin-only handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use kinfolk_core::error::CoreError;
use kinfolk_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] holding the `admin` role. Any other role is a 403.
///
/// Every write to the site content takes this as its first extractor:
///
/// ```ignore
/// async fn create_post(RequireAdmin(admin): RequireAdmin, ...) -> AppResult<...>
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role == ROLE_ADMIN {
            return Ok(RequireAdmin(user));
        }

        tracing::warn!(email = %user.email, role = %user.role, "Non-admin token on admin route");
        Err(AppError::Core(CoreError::Forbidden(
            "Admin role required".into(),
        )))
    }
}
