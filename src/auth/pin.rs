use crate::SecretString;

/// Compares submitted PINs against the single configured admin PIN.
///
/// Fails closed: with no PIN configured every candidate is rejected and the
/// misconfiguration is logged on each attempt.
#[derive(Debug, Clone)]
pub struct PinVerifier {
    pin: Option<SecretString>,
}

impl PinVerifier {
    pub fn new(pin: Option<SecretString>) -> Self {
        Self { pin }
    }

    pub fn is_configured(&self) -> bool {
        self.pin.is_some()
    }

    /// Returns true iff `candidate` equals the configured PIN exactly.
    ///
    /// No format check is applied. The comparison is plain string equality.
    pub fn verify(&self, candidate: &str) -> bool {
        match &self.pin {
            Some(pin) => pin.matches(candidate),
            None => {
                log::error!(
                    target: "fontvault::auth",
                    "msg=\"pin check failed closed\" reason=\"ADMIN_PIN not configured\""
                );
                false
            }
        }
    }
}
