//! Handlers for the `/reunions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::reunion::ReunionInput;
use kinfolk_store::repositories::ReunionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Reunion";

/// GET /api/v1/reunions
pub async fn list_reunions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reunions = ReunionRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: reunions }))
}

/// POST /api/v1/reunions
pub async fn create_reunion(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ReunionInput>,
) -> AppResult<impl IntoResponse> {
    let reunion = ReunionRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reunion })))
}

/// PUT /api/v1/reunions/{id}
///
/// Replaces the reunion; fields missing from the body are cleared.
pub async fn replace_reunion(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReunionInput>,
) -> AppResult<impl IntoResponse> {
    let reunion = ReunionRepo::replace(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: reunion }))
}

/// DELETE /api/v1/reunions/{id}
pub async fn delete_reunion(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if ReunionRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
