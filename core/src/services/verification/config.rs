//! Verification service configuration

/// Configuration for the verification staging service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Minutes a staged code stays valid
    pub code_expiration_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: crate::domain::DEFAULT_EXPIRATION_MINUTES,
        }
    }
}
