use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use chrono::Utc;

use super::UploadResponse;
use super::error::AppError;
use super::extract::Authenticated;
use super::routes::AppState;
use crate::VaultError;
use crate::storage::{ImageStore, MAX_IMAGE_BYTES, stored_name};

/// Request body limit on the upload route. Larger than [`MAX_IMAGE_BYTES`]
/// so oversized files reach the size check and get its message.
pub const UPLOAD_BODY_LIMIT: usize = 2 * MAX_IMAGE_BYTES;

const FILE_FIELD: &str = "file";

/// Store one image from the `file` field of a multipart form.
///
/// POST /api/upload
#[cfg_attr(feature = "tracing", tracing::instrument(name = "upload_image", skip_all))]
pub async fn upload_image<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError>
where
    F: Clone + Send + Sync + 'static,
    I: ImageStore + Clone + 'static,
{
    let mut multipart =
        multipart.map_err(|e| VaultError::Validation(format!("Invalid form data: {e}")))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VaultError::Validation(format!("Invalid form data: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| VaultError::Validation(format!("Invalid form data: {e}")))?;
        upload = Some((original, content_type, bytes));
        break;
    }

    let Some((original, content_type, bytes)) = upload else {
        return Err(VaultError::Validation("No file provided".to_owned()).into());
    };

    if !content_type.starts_with("image/") {
        return Err(VaultError::Validation("Only image files can be uploaded".to_owned()).into());
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(VaultError::Validation("File must be 5MB or smaller".to_owned()).into());
    }

    let filename = stored_name(&original, Utc::now().timestamp_millis());
    let stored = state.images.upload(&filename, &content_type, &bytes).await?;

    log::info!(
        target: "fontvault::api",
        "msg=\"image uploaded\" filename=\"{}\" bytes={}",
        stored.filename,
        bytes.len()
    );
    Ok(Json(stored))
}

/// Serve a stored image. Protected by the session gate only.
///
/// GET /storage/{filename}
pub async fn serve_image<F, I>(
    State(state): State<AppState<F, I>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    F: Clone + Send + Sync + 'static,
    I: ImageStore + Clone + 'static,
{
    let object = state
        .images
        .fetch(&filename)
        .await?
        .ok_or(AppError(VaultError::NotFound))?;

    Ok((
        [
            (CONTENT_TYPE, object.content_type),
            (CACHE_CONTROL, "public, max-age=3600".to_owned()),
        ],
        object.bytes,
    ))
}
