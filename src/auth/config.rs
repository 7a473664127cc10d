use std::fmt;

use chrono::Duration;

use crate::config::MIN_SECRET_LENGTH;
use crate::{SecretString, VaultError};

/// Signing and lifetime settings for session tokens.
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 key material.
    pub(crate) secret: SecretString,
    /// Absolute lifetime from issuance. Default: 7 days.
    pub(crate) lifetime: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl TokenConfig {
    /// # Errors
    ///
    /// Returns `VaultError::Configuration` if the secret is shorter than
    /// [`MIN_SECRET_LENGTH`] bytes.
    pub fn new(secret: impl Into<SecretString>) -> Result<Self, VaultError> {
        let secret = secret.into();

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(VaultError::Configuration(format!(
                "session signing secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            lifetime: Duration::days(7),
        })
    }

    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
