//! Session gate: decides, per navigational request, whether to let it
//! through or redirect it.
//!
//! The gate holds no state between requests. The session lives entirely in
//! the incoming cookie, which is verified from scratch every time.
//!
//! | Target            | Cookie            | Decision                               |
//! |-------------------|-------------------|----------------------------------------|
//! | PIN page          | valid             | redirect to the home page              |
//! | PIN page          | missing / invalid | allow                                  |
//! | any other page    | missing           | redirect to the PIN page               |
//! | any other page    | invalid           | clear cookie, redirect to the PIN page |
//! | any other page    | valid             | allow                                  |
//!
//! Exempt paths (the PIN endpoint, static assets) bypass the table entirely.

mod middleware;

pub use middleware::session_gate;

use crate::auth::{SessionCookieConfig, SessionTokenCodec};

/// Routing knobs for the gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// The PIN submission page.
    pub auth_page: String,
    /// Where already-authenticated visitors of the PIN page are sent.
    pub home_page: String,
    /// Path prefixes never intercepted.
    pub exempt_prefixes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            auth_page: "/auth".to_owned(),
            home_page: "/dashboard".to_owned(),
            exempt_prefixes: [
                "/api/auth/verify-pin",
                "/static/",
                "/_image",
                "/favicon.ico",
                "/robots.txt",
            ]
            .into_iter()
            .map(ToOwned::to_owned)
            .collect(),
        }
    }
}

impl GateConfig {
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect {
        location: String,
        /// Delete the session cookie as part of the redirect.
        clear_cookie: bool,
    },
}

impl GateDecision {
    fn redirect(location: &str, clear_cookie: bool) -> Self {
        GateDecision::Redirect {
            location: location.to_owned(),
            clear_cookie,
        }
    }
}

/// The gate's dependencies, shared by every request.
#[derive(Debug, Clone)]
pub struct SessionGate {
    pub config: GateConfig,
    pub codec: SessionTokenCodec,
    pub cookie: SessionCookieConfig,
}

impl SessionGate {
    pub fn new(config: GateConfig, codec: SessionTokenCodec, cookie: SessionCookieConfig) -> Self {
        Self {
            config,
            codec,
            cookie,
        }
    }

    /// Applies the decision table to one request.
    pub async fn evaluate(&self, path: &str, session_cookie: Option<&str>) -> GateDecision {
        if self.config.is_exempt(path) {
            return GateDecision::Allow;
        }

        if path == self.config.auth_page {
            if let Some(token) = session_cookie {
                if self.codec.verify(token).await {
                    log::debug!(target: "fontvault::gate", "msg=\"already authenticated\" path=\"{path}\"");
                    return GateDecision::redirect(&self.config.home_page, false);
                }
            }
            return GateDecision::Allow;
        }

        let Some(token) = session_cookie else {
            log::debug!(target: "fontvault::gate", "msg=\"no session cookie\" path=\"{path}\"");
            return GateDecision::redirect(&self.config.auth_page, false);
        };

        if self.codec.verify(token).await {
            GateDecision::Allow
        } else {
            log::info!(target: "fontvault::gate", "msg=\"invalid session cookie cleared\" path=\"{path}\"");
            GateDecision::redirect(&self.config.auth_page, true)
        }
    }
}
