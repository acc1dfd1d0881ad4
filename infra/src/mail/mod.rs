//! Mail transport module
//!
//! Implementations of the core `Mailer` trait:
//! - **SMTP**: production delivery through an authenticated relay (lettre)
//! - **Mock**: console output for development and testing

pub mod mock;
pub mod smtp;

pub use mock::MockMailer;
pub use smtp::SmtpMailer;

use std::sync::Arc;

use vr_core::services::verification::Mailer;
use vr_shared::config::MailConfig;

/// Create a mail transport based on configuration
///
/// Falls back to the mock transport if the configured provider cannot be
/// initialized, so a misconfigured relay degrades to visible console output
/// instead of a dead pipeline.
pub fn create_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match config.provider.as_str() {
        "smtp" => match SmtpMailer::new(config) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP transport: {}", e);
                tracing::warn!("Falling back to mock mail transport");
                Arc::new(MockMailer::new())
            }
        },
        _ => Arc::new(MockMailer::new()),
    }
}
