//! Verification code entity for e-mail based account verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Verification code entity staged for a pending registration
///
/// At most one code is live per address: staging a new code overwrites the
/// previous entry and resets its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// E-mail address this code was staged for
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with a cryptographically secure
    /// random 6-digit code and the default expiration
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code is staged for
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiration_minutes);

        Self {
            id: Uuid::new_v4(),
            email,
            code,
            created_at: now,
            expires_at,
        }
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Remaining lifetime in whole seconds, clamped at zero
    pub fn ttl_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    /// Generates a cryptographically secure random 6-digit code
    ///
    /// Uses OsRng (OS-provided CSPRNG) for secure random number generation.
    fn generate_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias is negligible for 6-digit codes
        let code = num % 1_000_000;
        format!("{:06}", code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_code_has_six_digits() {
        let vc = VerificationCode::new("a@x.com".to_string());
        assert_eq!(vc.code.len(), CODE_LENGTH);
        assert!(vc.code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_new_code_not_expired() {
        let vc = VerificationCode::new("a@x.com".to_string());
        assert!(!vc.is_expired());
        assert!(vc.ttl_seconds() > 0);
        assert!(vc.ttl_seconds() <= (DEFAULT_EXPIRATION_MINUTES * 60) as u64);
    }

    #[test]
    fn test_expired_code() {
        let vc = VerificationCode::new_with_expiration("a@x.com".to_string(), -1);
        assert!(vc.is_expired());
        assert_eq!(vc.ttl_seconds(), 0);
    }

    #[test]
    fn test_codes_differ_between_calls() {
        // Six digits collide sometimes, but not across ten draws
        let codes: std::collections::HashSet<_> = (0..10)
            .map(|_| VerificationCode::new("a@x.com".to_string()).code)
            .collect();
        assert!(codes.len() > 1);
    }
}
