//! Handlers for the `/blog` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_store::models::blog::BlogPostInput;
use kinfolk_store::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "BlogPost";

/// GET /api/v1/blog
pub async fn list_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/blog/slug/{slug}
///
/// Public read of a post; counts as a view.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::increment_views(&state.store, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, slug)))?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/v1/blog/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::find_by_id(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/blog
pub async fn create_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BlogPostInput>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/blog/{id}
///
/// Appends the previous content to the post's revisions.
pub async fn update_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<BlogPostInput>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::update(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/blog/{id}
pub async fn delete_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if BlogRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
