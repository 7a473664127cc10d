//! PIN verification and stateless session tokens.
//!
//! A successful PIN check issues an HS256-signed token carrying an
//! `authenticated` claim. The token travels in the `auth-session` cookie and
//! is re-verified from scratch on every request. There is no server-side
//! session table.
//!
//! ```rust,ignore
//! use fontvault::auth::{PinVerifier, SessionTokenCodec, TokenConfig};
//!
//! let verifier = PinVerifier::new(Some("1234".into()));
//! let codec = SessionTokenCodec::new(TokenConfig::new("a-signing-secret-of-32-bytes-or-more")?);
//!
//! if verifier.verify("1234") {
//!     let token = codec.issue().await?;
//!     assert!(codec.verify(&token).await);
//! }
//! ```

mod claims;
mod codec;
mod config;
mod cookie;
mod pin;

pub use claims::SessionClaims;
pub use codec::SessionTokenCodec;
pub use config::TokenConfig;
pub use cookie::{SESSION_COOKIE_NAME, SessionCookieConfig};
pub use pin::PinVerifier;
