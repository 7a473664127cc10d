//! PIN submission and logout.
//!
//! These two endpoints answer with `{ success, message }` bodies rather than
//! going through [`AppError`](super::AppError).

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};

use super::routes::AppState;
use super::{FailureResponse, PinRequest, SuccessResponse};

const INVALID_PIN: &str = "Invalid PIN";
const SERVER_ERROR: &str = "Server error";

/// Exchange the admin PIN for a session cookie.
///
/// POST /api/auth/verify-pin
#[cfg_attr(feature = "tracing", tracing::instrument(name = "verify_pin", skip_all))]
pub async fn verify_pin<F, I>(State(state): State<AppState<F, I>>, body: Bytes) -> Response
where
    F: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    let request: PinRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!(target: "fontvault::api", "msg=\"unreadable pin request\" error=\"{e}\"");
            return server_error();
        }
    };

    let accepted = request
        .pin_str()
        .is_some_and(|candidate| state.pin_verifier.verify(candidate));
    if !accepted {
        log::info!(target: "fontvault::api", "msg=\"pin rejected\"");
        return (StatusCode::UNAUTHORIZED, Json(FailureResponse::new(INVALID_PIN))).into_response();
    }

    match state.token_codec.issue().await {
        Ok(token) => {
            log::info!(target: "fontvault::api", "msg=\"session started\"");
            let cookie = state.cookie_config.session_cookie(token);
            (
                StatusCode::OK,
                [(SET_COOKIE, cookie.to_string())],
                Json(SuccessResponse::ok()),
            )
                .into_response()
        }
        Err(e) => {
            log::error!(target: "fontvault::api", "msg=\"session token issue failed\" error=\"{e}\"");
            server_error()
        }
    }
}

/// Drop the session cookie. Nothing is revoked server-side.
///
/// POST /api/auth/logout
#[cfg_attr(feature = "tracing", tracing::instrument(name = "logout", skip_all))]
pub async fn logout<F, I>(State(state): State<AppState<F, I>>) -> Response
where
    F: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    let cookie = state.cookie_config.removal_cookie();
    log::info!(target: "fontvault::api", "msg=\"session ended\"");
    (
        StatusCode::OK,
        [(SET_COOKIE, cookie.to_string())],
        Json(SuccessResponse::ok()),
    )
        .into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::new(SERVER_ERROR)),
    )
        .into_response()
}
