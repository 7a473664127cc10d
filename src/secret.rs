//! Redacting wrapper for the admin PIN and the signing secret.

use std::fmt;

/// A string that never shows up in logs.
///
/// `Debug` and `Display` print `[REDACTED]`. Use [`SecretString::expose_secret`]
/// or [`SecretString::as_bytes`] at the single place the value is needed.
///
/// ```rust
/// use fontvault::SecretString;
///
/// let pin = SecretString::new("1234");
/// assert_eq!(format!("{pin:?}"), "SecretString([REDACTED])");
/// assert!(pin.matches("1234"));
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Raw bytes, used to derive HMAC keys.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Plain equality against a candidate value.
    ///
    /// This is an ordinary string comparison and is not constant-time.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = SecretString::new("0420");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn test_matches_is_exact() {
        let secret = SecretString::new("1234");
        assert!(secret.matches("1234"));
        assert!(!secret.matches("1235"));
        assert!(!secret.matches("12345"));
        assert!(!secret.matches(" 1234"));
        assert!(!secret.matches(""));
    }

    #[test]
    fn test_len_counts_bytes() {
        let secret: SecretString = "ab".into();
        assert_eq!(secret.len(), 2);
        assert!(!secret.is_empty());
        assert!(SecretString::new(String::new()).is_empty());
    }
}
