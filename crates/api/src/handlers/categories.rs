//! Handler for `/categories`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_store::repositories::{CategoryRepo, GalleryRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// Each category with the number of published gallery items in it.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let gallery = GalleryRepo::all(&state.store).await?;
    let categories = CategoryRepo::list_with_counts(&state.store, &gallery).await?;
    Ok(Json(DataResponse { data: categories }))
}
