//! Font catalog endpoints. Every handler re-checks the session cookie through
//! [`Authenticated`] before touching the store.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

use super::SuccessResponse;
use super::error::AppError;
use super::extract::Authenticated;
use super::routes::AppState;
use crate::VaultError;
use crate::catalog::{Font, FontRepository, FontUpdate, NewFont};
use crate::storage::{ImageStore, filename_from_url};

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError(VaultError::Validation(format!("Invalid font payload: {e}"))))
}

/// GET /api/fonts
#[cfg_attr(feature = "tracing", tracing::instrument(name = "list_fonts", skip_all))]
pub async fn list_fonts<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
) -> Result<Json<Vec<Font>>, AppError>
where
    F: FontRepository + Clone + 'static,
    I: Clone + Send + Sync + 'static,
{
    Ok(Json(state.fonts.list().await?))
}

/// POST /api/fonts
#[cfg_attr(feature = "tracing", tracing::instrument(name = "create_font", skip_all))]
pub async fn create_font<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    F: FontRepository + Clone + 'static,
    I: Clone + Send + Sync + 'static,
{
    let new_font: NewFont = parse_body(&body)?;
    let font = state.fonts.create(new_font).await?;

    log::info!(target: "fontvault::api", "msg=\"font created\" id=\"{}\"", font.id);
    Ok((StatusCode::CREATED, Json(font)))
}

/// GET /api/fonts/{id}
pub async fn get_font<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    Path(id): Path<String>,
) -> Result<Json<Font>, AppError>
where
    F: FontRepository + Clone + 'static,
    I: Clone + Send + Sync + 'static,
{
    state
        .fonts
        .find(&id)
        .await?
        .map(Json)
        .ok_or(AppError(VaultError::NotFound))
}

/// PUT /api/fonts/{id}
#[cfg_attr(feature = "tracing", tracing::instrument(name = "update_font", skip_all, fields(id = %id)))]
pub async fn update_font<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Font>, AppError>
where
    F: FontRepository + Clone + 'static,
    I: Clone + Send + Sync + 'static,
{
    let update: FontUpdate = parse_body(&body)?;
    let font = state.fonts.update(&id, update).await?;

    log::info!(target: "fontvault::api", "msg=\"font updated\" id=\"{id}\"");
    Ok(Json(font))
}

/// Removes the font's stored images, then the font.
///
/// Image removal is best effort: a failure is logged and the font is deleted
/// anyway.
///
/// DELETE /api/fonts/{id}
#[cfg_attr(feature = "tracing", tracing::instrument(name = "delete_font", skip_all, fields(id = %id)))]
pub async fn delete_font<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError>
where
    F: FontRepository + Clone + 'static,
    I: ImageStore + Clone + 'static,
{
    if let Some(font) = state.fonts.find(&id).await? {
        let filenames: Vec<String> = font
            .image_urls
            .iter()
            .filter_map(|url| filename_from_url(url))
            .map(ToOwned::to_owned)
            .collect();

        if !filenames.is_empty() {
            match state.images.remove(&filenames).await {
                Ok(()) => {
                    log::info!(
                        target: "fontvault::api",
                        "msg=\"font images removed\" id=\"{id}\" count={}",
                        filenames.len()
                    );
                }
                Err(e) => {
                    log::warn!(
                        target: "fontvault::api",
                        "msg=\"font image removal failed, continuing\" id=\"{id}\" error=\"{e}\""
                    );
                }
            }
        }
    }

    state.fonts.delete(&id).await?;

    log::info!(target: "fontvault::api", "msg=\"font deleted\" id=\"{id}\"");
    Ok(Json(SuccessResponse::ok()))
}

/// Flips the favorite flag server-side. The body is ignored.
///
/// PATCH /api/fonts/{id}
#[cfg_attr(feature = "tracing", tracing::instrument(name = "toggle_favorite", skip_all, fields(id = %id)))]
pub async fn toggle_favorite<F, I>(
    _: Authenticated,
    State(state): State<AppState<F, I>>,
    Path(id): Path<String>,
) -> Result<Json<Font>, AppError>
where
    F: FontRepository + Clone + 'static,
    I: Clone + Send + Sync + 'static,
{
    let font = state.fonts.toggle_favorite(&id).await?;

    log::info!(
        target: "fontvault::api",
        "msg=\"favorite toggled\" id=\"{id}\" is_favorite={}",
        font.is_favorite
    );
    Ok(Json(font))
}
