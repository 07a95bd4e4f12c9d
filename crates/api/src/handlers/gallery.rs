//! Handlers for the `/gallery` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::gallery::{CreateGalleryItem, GalleryFilter, UpdateGalleryItem};
use kinfolk_store::repositories::GalleryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "GalleryItem";

/// GET /api/v1/gallery?category=&tag=&status=&featured=
///
/// Published items unless `status` says otherwise, newest upload first.
pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<GalleryFilter>,
) -> AppResult<impl IntoResponse> {
    let items = GalleryRepo::list(&state.store, &filter).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/gallery
pub async fn create_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryItem>,
) -> AppResult<impl IntoResponse> {
    let item = GalleryRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/gallery/{id}
pub async fn update_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateGalleryItem>,
) -> AppResult<impl IntoResponse> {
    let item = GalleryRepo::update(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/gallery/{id}
pub async fn delete_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if GalleryRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
