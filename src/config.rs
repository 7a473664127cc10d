//! Environment-driven configuration for the catalog server.
//!
//! ```rust
//! use fontvault::config::{Environment, VaultConfig};
//!
//! let config = VaultConfig::from_lookup(|key| match key {
//!     "ADMIN_PIN" => Some("1234".to_owned()),
//!     "JWT_SECRET" => Some("a-signing-secret-that-is-32-bytes-or-more".to_owned()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.environment, Environment::Development);
//! assert_eq!(config.session_ttl, chrono::Duration::days(7));
//! ```

use std::path::PathBuf;

use chrono::Duration;

use crate::auth::{SessionCookieConfig, TokenConfig};
use crate::{SecretString, VaultError};

/// Minimum accepted signing secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Used when `JWT_SECRET` is unset outside production. Never deploy with it.
pub const DEV_SIGNING_SECRET: &str = "fontvault-development-signing-secret-change-me";

pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Upper bound for `SESSION_TTL_DAYS`.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `production` and `prod` (any case) select production; anything else is development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Runtime configuration, usually built with [`VaultConfig::from_env`].
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Only affects the `Secure` attribute of the session cookie.
    pub environment: Environment,

    /// The single admin PIN. `None` makes every PIN check fail.
    pub admin_pin: Option<SecretString>,

    /// HMAC-SHA256 key material for session tokens.
    pub signing_secret: SecretString,

    /// Absolute session lifetime. Default: 7 days.
    pub session_ttl: Duration,

    pub bind_addr: String,

    /// When set, fonts and images persist under this directory.
    pub data_dir: Option<PathBuf>,

    pub static_dir: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            admin_pin: None,
            signing_secret: SecretString::new(DEV_SIGNING_SECRET),
            session_ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            data_dir: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl VaultConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// See [`VaultConfig::from_lookup`].
    pub fn from_env() -> Result<Self, VaultError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                log::warn!(target: "fontvault::config", "msg=\"failed to load .env\" error=\"{err}\"");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// - `JWT_SECRET` unset while `APP_ENV` is production
    /// - signing secret shorter than [`MIN_SECRET_LENGTH`]
    /// - `SESSION_TTL_DAYS` not an integer in `1..=MAX_SESSION_TTL_DAYS`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VaultError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let environment = get("APP_ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let signing_secret = match get("JWT_SECRET") {
            Some(secret) => SecretString::new(secret),
            None if environment.is_production() => {
                return Err(VaultError::Configuration(
                    "JWT_SECRET must be set in production".to_owned(),
                ));
            }
            None => {
                log::warn!(
                    target: "fontvault::config",
                    "msg=\"JWT_SECRET not set, using insecure development secret\""
                );
                SecretString::new(DEV_SIGNING_SECRET)
            }
        };

        if signing_secret.len() < MIN_SECRET_LENGTH {
            return Err(VaultError::Configuration(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                signing_secret.len()
            )));
        }

        let admin_pin = get("ADMIN_PIN").map(SecretString::new);
        if admin_pin.is_none() {
            log::error!(
                target: "fontvault::config",
                "msg=\"ADMIN_PIN not set, every PIN attempt will be rejected\""
            );
        }

        let session_ttl = match get("SESSION_TTL_DAYS") {
            Some(raw) => {
                let days: i64 = raw.parse().map_err(|_| {
                    VaultError::Configuration(format!("SESSION_TTL_DAYS is not a number: {raw}"))
                })?;
                if days <= 0 {
                    return Err(VaultError::Configuration(
                        "SESSION_TTL_DAYS must be positive".to_owned(),
                    ));
                }
                if days > MAX_SESSION_TTL_DAYS {
                    return Err(VaultError::Configuration(format!(
                        "SESSION_TTL_DAYS must be at most {MAX_SESSION_TTL_DAYS}, got {days}"
                    )));
                }
                Duration::try_days(days).ok_or_else(|| {
                    VaultError::Configuration(format!("SESSION_TTL_DAYS out of range: {days}"))
                })?
            }
            None => Duration::days(DEFAULT_SESSION_TTL_DAYS),
        };

        Ok(Self {
            environment,
            admin_pin,
            signing_secret,
            session_ttl,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            data_dir: get("DATA_DIR").map(PathBuf::from),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }

    /// Token settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Configuration` if the signing secret is too short.
    pub fn token_config(&self) -> Result<TokenConfig, VaultError> {
        Ok(TokenConfig::new(self.signing_secret.clone())?.with_lifetime(self.session_ttl))
    }

    /// Session cookie attributes derived from this configuration.
    pub fn cookie_config(&self) -> SessionCookieConfig {
        SessionCookieConfig {
            secure: self.environment.is_production(),
            max_age: self.session_ttl,
            ..SessionCookieConfig::default()
        }
    }
}
