use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{SessionClaims, TokenConfig};
use crate::VaultError;
use crate::clock::{Clock, SystemClock};

/// Issues and verifies signed, time-limited session tokens.
///
/// Tokens are compact HS256 JWTs. Keys are derived once from the configured
/// secret when the codec is built. Cloning is cheap and clones share the
/// same clock.
#[derive(Clone)]
pub struct SessionTokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl SessionTokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: TokenConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            clock,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.config.lifetime()
    }

    /// Issues a token valid for the configured lifetime from now.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Internal` if the expiry is not representable or
    /// signing fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "issue_session_token", skip_all, err))]
    pub async fn issue(&self) -> Result<String, VaultError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.config.lifetime())
            .ok_or_else(|| VaultError::Internal("session lifetime overflows the clock".to_owned()))?;
        let claims = SessionClaims {
            authenticated: true,
            timestamp: now.timestamp_millis(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| VaultError::Internal(format!("failed to sign session token: {e}")))?;

        log::debug!(
            target: "fontvault::auth",
            "msg=\"session token issued\" token_prefix=\"{}...\" exp={}",
            token_prefix(&token),
            claims.exp
        );

        Ok(token)
    }

    /// Returns true iff the signature checks out under the configured secret
    /// with HS256 and the token has not expired.
    ///
    /// Never fails: malformed input, a bad signature, another algorithm and
    /// expiry all yield `false` without saying which.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "verify_session_token", skip_all))]
    pub async fn verify(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(_) => true,
            Err(err) => {
                log::debug!(
                    target: "fontvault::auth",
                    "msg=\"session token rejected\" reason=\"{err}\" token_prefix=\"{}...\"",
                    token_prefix(token)
                );
                false
            }
        }
    }

    pub(crate) fn decode(&self, token: &str) -> Result<SessionClaims, VaultError> {
        // exp is checked against the injected clock below, not the system clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| VaultError::TokenInvalid)?;

        if data.claims.is_expired_at(self.clock.now().timestamp()) {
            return Err(VaultError::TokenExpired);
        }

        Ok(data.claims)
    }
}

fn token_prefix(token: &str) -> String {
    token.chars().take(8).collect()
}
