use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// There is no subject: the catalog has exactly one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Always true when issued.
    #[serde(default)]
    pub authenticated: bool,
    /// Issuance instant in Unix milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

impl SessionClaims {
    /// True once `now_secs` has reached the expiry instant.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}
