//! Handlers for the `/documents` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::document::{CreateDocument, UpdateDocument};
use kinfolk_store::repositories::DocumentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Document";

/// GET /api/v1/documents
///
/// Newest upload date first.
pub async fn list_documents(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let documents = DocumentRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/v1/documents
pub async fn create_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// PUT /api/v1/documents/{id}
pub async fn update_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::update(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if DocumentRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
