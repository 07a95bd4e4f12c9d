//! Handlers for the `/family` resource.
//!
//! Reads are public; writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_core::family_tree::{build_tree, RootPolicy};
use kinfolk_store::models::family::{CreateFamilyMember, UpdateFamilyMember};
use kinfolk_store::repositories::FamilyRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "FamilyMember";

/// Query parameters for `GET /family/tree`.
#[derive(Debug, Deserialize)]
pub struct TreeParams {
    /// `strict` or `forest`; the configured policy when absent.
    pub mode: Option<String>,
}

/// GET /api/v1/family
pub async fn list_members(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let members = FamilyRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/family/tree
///
/// The nested tree, or `null` when there are no members. In strict mode a
/// member list without exactly one root is a 400.
pub async fn get_tree(
    State(state): State<AppState>,
    Query(params): Query<TreeParams>,
) -> AppResult<impl IntoResponse> {
    let policy = match params.mode.as_deref() {
        Some(mode) => mode.parse::<RootPolicy>()?,
        None => state.config.tree_root_policy,
    };

    let members = FamilyRepo::list(&state.store).await?;
    let tree = build_tree(&members, policy).map_err(CoreError::from)?;

    if let Some(tree) = &tree {
        if !tree.orphans.is_empty() || !tree.detached.is_empty() {
            tracing::warn!(
                orphans = tree.orphans.len(),
                detached = tree.detached.len(),
                "Family tree has unreachable members"
            );
        }
    }

    Ok(Json(DataResponse { data: tree }))
}

/// GET /api/v1/family/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let member = FamilyRepo::find_by_id(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/family
pub async fn create_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFamilyMember>,
) -> AppResult<impl IntoResponse> {
    let member = FamilyRepo::create(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/family/{id}
pub async fn update_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateFamilyMember>,
) -> AppResult<impl IntoResponse> {
    let member = FamilyRepo::update(&state.store, &id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY, id)))?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/family/{id}
///
/// 409 while the member still has children.
pub async fn delete_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if FamilyRepo::delete(&state.store, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(ENTITY, id)))
    }
}
