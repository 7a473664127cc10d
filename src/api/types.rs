use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request DTOs

/// Body of the PIN submission.
///
/// `pin` is kept as raw JSON: a missing value or one that is not a string is
/// a wrong PIN, not a malformed request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PinRequest {
    #[serde(default)]
    pub pin: Option<Value>,
}

impl PinRequest {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: Some(Value::String(pin.into())),
        }
    }

    /// The submitted PIN, if it was sent as a string.
    pub fn pin_str(&self) -> Option<&str> {
        self.pin.as_ref().and_then(Value::as_str)
    }
}

// Response DTOs

/// `{ "success": true }` from the PIN and logout endpoints, and from deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": false, "message": ... }` from the PIN endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<crate::VaultError> for ErrorResponse {
    fn from(err: crate::VaultError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

pub use crate::storage::StoredImage as UploadResponse;
