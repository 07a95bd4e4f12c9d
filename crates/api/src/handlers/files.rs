//! Handlers for `/files`: the admin file manager over the public directory.
//!
//! Directory scans and usage analysis touch every file, so they run on the
//! blocking pool. Responses use the `{ "success": true, ... }` envelope.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::{Multipart, Query, State};
use axum::Json;
use kinfolk_core::error::CoreError;
use kinfolk_core::storage::{
    file_listing, human_size, resolve_within_root, scan_directory, unique_filename,
    validate_file_type, FileKind, FileListing, UPLOADS_DIR, UPLOAD_ALLOWED_TYPES,
};
use kinfolk_core::usage::{analyze, UsageReport};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Name of the multipart field carrying the upload.
const UPLOAD_FIELD: &str = "file";

/// Attempts at claiming a fresh name when a concurrent upload takes it first.
const MAX_NAME_ATTEMPTS: usize = 5;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `image`, `document`, `video`, `audio`, `other`, or `all` (default).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// Web path of the file, e.g. `/uploads/photo.jpg`.
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Stored name, unique within the uploads directory.
    pub name: String,
    pub original_name: String,
    pub size: u64,
    /// Content type reported by the client.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Web path under which the file is served.
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct UploadBody {
    pub file: UploadedFile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/files/gallery?type=
///
/// Every file under the public directory, newest modification first, with
/// per-type counts.
pub async fn list_files(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<SuccessResponse<FileListing>>> {
    let kind = match params.kind.as_deref() {
        None | Some("") | Some("all") => None,
        Some(other) => Some(other.parse::<FileKind>()?),
    };

    let root = state.config.public_dir.clone();
    let listing = tokio::task::spawn_blocking(move || file_listing(scan_directory(&root), kind))
        .await
        .map_err(|e| AppError::InternalError(format!("File scan task failed: {e}")))?;

    Ok(Json(SuccessResponse::new(listing)))
}

/// GET /api/v1/files/analyze
///
/// Split public files into used and unused by searching the data documents
/// for their names.
pub async fn analyze_files(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<UsageReport>>> {
    let public_dir = state.config.public_dir.clone();
    let data_dir = state.store.data_dir().to_path_buf();

    let report = tokio::task::spawn_blocking(move || analyze(&public_dir, &data_dir))
        .await
        .map_err(|e| AppError::InternalError(format!("File analysis task failed: {e}")))?;

    tracing::info!(
        used = report.stats.used.files,
        unused = report.stats.unused.bucket.files,
        "File usage analyzed"
    );
    Ok(Json(SuccessResponse::new(report)))
}

/// DELETE /api/v1/files?path=
///
/// Delete one file inside the public directory. Paths that leave the
/// directory are rejected with 403.
pub async fn delete_file(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<SuccessResponse<MessageBody>>> {
    let url_path = params
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("No file path provided".into()))?;

    let root = &state.config.public_dir;
    let target = resolve_within_root(root, &url_path)?;

    let metadata = match tokio::fs::metadata(&target).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::Core(CoreError::not_found("File", url_path)));
        }
        Err(e) => return Err(AppError::InternalError(format!("Failed to stat file: {e}"))),
    };
    if !metadata.is_file() {
        return Err(AppError::BadRequest(format!("{url_path} is not a file")));
    }
    ensure_inside(root, &target).await?;

    tokio::fs::remove_file(&target)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete file: {e}")))?;

    tracing::info!(path = %url_path, email = %admin.email, "Public file deleted");
    Ok(Json(SuccessResponse::new(MessageBody {
        message: "File deleted successfully".into(),
    })))
}

/// POST /api/v1/files/upload
///
/// Store the multipart `file` field under `uploads/` with a sanitized,
/// collision-free name. Rejects disallowed types and files over the
/// configured size limit.
pub async fn upload_file(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<SuccessResponse<UploadBody>>> {
    let max_bytes = state.config.max_upload_bytes;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("No file provided".into()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !validate_file_type(&original_name, &content_type, UPLOAD_ALLOWED_TYPES) {
            return Err(AppError::BadRequest("File type not allowed".into()));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if (data.len() + chunk.len()) as u64 > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "File size exceeds maximum allowed size of {}",
                    human_size(max_bytes)
                )));
            }
            data.extend_from_slice(&chunk);
        }

        let uploads_dir = state.config.public_dir.join(UPLOADS_DIR);
        let (name, path) = write_unique(&uploads_dir, &original_name, &data).await?;

        tracing::info!(
            name = %name,
            original = %original_name,
            size = data.len(),
            email = %admin.email,
            "File uploaded"
        );

        return Ok(Json(SuccessResponse::new(UploadBody {
            file: UploadedFile {
                url: format!("/{UPLOADS_DIR}/{name}"),
                name,
                original_name,
                size: data.len() as u64,
                content_type,
                path,
            },
        })));
    }

    Err(AppError::BadRequest("No file provided".into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write `data` under a fresh name derived from `original_name`.
///
/// The file is opened with `create_new`, so a name claimed by a concurrent
/// upload between choosing and opening is never overwritten; the next free
/// name is tried instead.
async fn write_unique(dir: &Path, original_name: &str, data: &[u8]) -> AppResult<(String, PathBuf)> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;

    for _ in 0..MAX_NAME_ATTEMPTS {
        let name = unique_filename(original_name, dir);
        let path = dir.join(&name);

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(AppError::InternalError(format!("Failed to create file: {e}"))),
        };

        let written = async {
            file.write_all(data).await?;
            file.flush().await
        }
        .await;
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(AppError::InternalError(format!("Failed to write file: {e}")));
        }
        return Ok((name, path));
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not find a free name for {original_name}"
    ))))
}

/// Reject targets that resolve outside `root` once symlinks are followed.
async fn ensure_inside(root: &Path, target: &Path) -> AppResult<()> {
    let canonical_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to resolve public dir: {e}")))?;
    let canonical_target = tokio::fs::canonicalize(target)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to resolve file path: {e}")))?;

    if canonical_target.starts_with(&canonical_root) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden("Invalid file path".into())))
    }
}
