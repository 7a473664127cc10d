use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::ErrorResponse;
use crate::VaultError;

/// Converts `VaultError` into a status code and a `{ "error": ... }` body.
///
/// Every authentication failure renders as the same 401 `Unauthorized` so a
/// client cannot tell a missing cookie from a forged or expired one.
#[derive(Debug)]
pub struct AppError(pub VaultError);

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VaultError::Unauthorized
            | VaultError::TokenInvalid
            | VaultError::TokenExpired
            | VaultError::InvalidPin => StatusCode::UNAUTHORIZED,
            VaultError::NotFound => StatusCode::NOT_FOUND,
            VaultError::Validation(_) => StatusCode::BAD_REQUEST,
            VaultError::PinNotConfigured
            | VaultError::Storage(_)
            | VaultError::Database(_)
            | VaultError::Configuration(_)
            | VaultError::Request(_)
            | VaultError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = if status == StatusCode::UNAUTHORIZED {
            ErrorResponse::from(VaultError::Unauthorized)
        } else {
            if status.is_server_error() {
                log::error!(target: "fontvault::api", "msg=\"request failed\" error=\"{}\"", self.0);
            }
            ErrorResponse::from(self.0)
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: VaultError) -> (StatusCode, serde_json::Value) {
        let response = AppError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_auth_errors_are_indistinguishable() {
        for err in [
            VaultError::Unauthorized,
            VaultError::TokenInvalid,
            VaultError::TokenExpired,
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, serde_json::json!({ "error": "Unauthorized" }));
        }
    }

    #[tokio::test]
    async fn test_status_mapping() {
        assert_eq!(render(VaultError::NotFound).await.0, StatusCode::NOT_FOUND);

        let (status, body) = render(VaultError::Validation("No file provided".to_owned())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file provided");

        let (status, body) = render(VaultError::Database("disk full".to_owned())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error: disk full");
    }
}
