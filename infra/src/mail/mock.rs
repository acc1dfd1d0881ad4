//! Mock mail transport
//!
//! Logs messages to the console instead of sending them. Used in
//! development and as the fallback when the real transport cannot be
//! initialized.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use vr_core::services::verification::Mailer;
use vr_shared::utils::validation::mask_email;

/// Mock mail transport for development and testing
///
/// Tracks the number of messages "sent" and can simulate transport
/// failures.
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailer {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock transport with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
    ) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                recipient = %mask_email(recipient),
                "Mock mail transport simulating failure"
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL TRANSPORT - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: Email Verification");
            println!("Your verification code is: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_transport",
            provider = "mock",
            recipient = %mask_email(recipient),
            message_id = %message_id,
            "Verification email sent (mock)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_success() {
        let mailer = MockMailer::with_options(false, false);
        let result = mailer.send_verification_code("a@x.com", "123456").await;

        assert!(result.is_ok());
        assert!(result.unwrap().starts_with("mock_"));
        assert_eq!(mailer.message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let mailer = MockMailer::with_options(false, true);
        let result = mailer.send_verification_code("a@x.com", "123456").await;

        assert!(result.is_err());
        assert_eq!(mailer.message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_counter() {
        let mailer = MockMailer::with_options(false, false);

        for i in 1..=3 {
            let _ = mailer
                .send_verification_code("a@x.com", &format!("{:06}", i))
                .await;
            assert_eq!(mailer.message_count(), i);
        }
    }
}
