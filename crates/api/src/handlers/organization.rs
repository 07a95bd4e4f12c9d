//! Handlers for the `/organization` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::organization::{CreateOrganizationMember, UpdateOrganizationMember};
use kinfolk_store::repositories::OrganizationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "OrganizationMember";

/// GET /api/v1/organization
pub async fn list_members(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let members = OrganizationRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/organization
pub async fn create_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOrganizationMember>,
) -> AppResult<impl IntoResponse> {
    let member = OrganizationRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/organization/{id}
pub async fn update_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrganizationMember>,
) -> AppResult<impl IntoResponse> {
    let member = OrganizationRepo::update(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/organization/{id}
pub async fn delete_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if OrganizationRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
