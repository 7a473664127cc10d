//! A PIN-gated catalog for archiving typeface metadata and reference imagery.
//!
//! The crate is organised leaves-first:
//!
//! - [`auth`]: PIN verification, the signed session token codec and the
//!   session cookie helpers.
//! - [`gate`]: the per-request session gate that protects every page.
//! - [`api`]: the axum HTTP surface (PIN/logout endpoints, fonts CRUD,
//!   uploads, page shells).
//! - [`catalog`] and [`storage`]: the font repository and image store seams
//!   with in-memory and file backends.
//! - [`compare`]: the bounded comparison selection used by the UI.
//! - [`optimistic`]: optimistic mutations with rollback, and the list views
//!   built on them.

pub mod api;
pub mod auth;
pub mod catalog;
#[cfg(feature = "client")]
pub mod client;
pub mod clock;
pub mod compare;
pub mod config;
pub mod gate;
pub mod optimistic;
mod secret;
pub mod storage;

use std::fmt;

pub use auth::{PinVerifier, SessionClaims, SessionCookieConfig, SessionTokenCodec, TokenConfig};
pub use catalog::{Category, Font, FontRepository, FontUpdate, License, NewFont};
pub use clock::{Clock, ManualClock, SystemClock};
pub use compare::{ComparisonSelection, Selectable, SelectionChange};
pub use config::{Environment, VaultConfig};
pub use gate::{GateConfig, GateDecision, SessionGate};
pub use optimistic::{MutationOutcome, perform_optimistic};
pub use secret::SecretString;
pub use storage::ImageStore;

#[derive(Debug, Clone, PartialEq)]
pub enum VaultError {
    InvalidPin,
    PinNotConfigured,
    TokenInvalid,
    TokenExpired,
    Unauthorized,
    NotFound,
    Validation(String),
    Storage(String),
    Database(String),
    Configuration(String),
    Request(String),
    Internal(String),
}

impl std::error::Error for VaultError {}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::InvalidPin => write!(f, "Invalid PIN"),
            VaultError::PinNotConfigured => write!(f, "Admin PIN is not configured"),
            VaultError::TokenInvalid => write!(f, "Invalid session token"),
            VaultError::TokenExpired => write!(f, "Session token has expired"),
            VaultError::Unauthorized => write!(f, "Unauthorized"),
            VaultError::NotFound => write!(f, "Not found"),
            VaultError::Validation(msg) => write!(f, "{msg}"),
            VaultError::Storage(msg) => write!(f, "Storage error: {msg}"),
            VaultError::Database(msg) => write!(f, "Database error: {msg}"),
            VaultError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            VaultError::Request(msg) => write!(f, "Request failed: {msg}"),
            VaultError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}
