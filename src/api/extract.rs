use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::AppError;
use super::routes::AppState;
use crate::VaultError;

/// Proof that the request carries a valid session cookie.
///
/// Data routes take this as their first extractor, so the check runs again
/// even though the session gate already let the request through. Both use
/// the same codec.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

impl<F, I> FromRequestParts<AppState<F, I>> for Authenticated
where
    F: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<F, I>,
    ) -> Result<Self, Self::Rejection> {
        let token = state
            .cookie_config
            .extract(&parts.headers)
            .ok_or(AppError(VaultError::Unauthorized))?;

        if state.token_codec.verify(&token).await {
            Ok(Authenticated)
        } else {
            Err(AppError(VaultError::Unauthorized))
        }
    }
}
