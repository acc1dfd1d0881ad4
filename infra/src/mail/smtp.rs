//! SMTP mail transport using lettre

use async_trait::async_trait;
use lettre::{
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};
use uuid::Uuid;

use vr_core::services::verification::Mailer;
use vr_shared::config::MailConfig;
use vr_shared::utils::validation::mask_email;

use crate::InfrastructureError;

/// Mail transport delivering through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new SMTP transport from configuration
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.smtp_user.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP from address: {}", e))
        })?;

        let transport = if config.use_tls {
            let credentials =
                Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| {
                    InfrastructureError::Config(format!("Failed to create SMTP relay: {}", e))
                })?
                .credentials(credentials)
                .port(config.smtp_port)
                .build()
        } else {
            // Plain connection for local relays (Mailpit/Mailhog)
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        };

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP transport initialized"
        );

        Ok(Self { transport, from })
    }

    fn build_message(&self, recipient: &str, code: &str) -> Result<Message, InfrastructureError> {
        let to: Mailbox = recipient.parse().map_err(|e| {
            InfrastructureError::Mail(format!("Invalid recipient address: {}", e))
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Email Verification")
            .body(format!("Your verification code is: {}", code))
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
    ) -> Result<String, String> {
        let message = self
            .build_message(recipient, code)
            .map_err(|e| e.to_string())?;

        debug!(recipient = %mask_email(recipient), "Dispatching SMTP send");

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {}", e))?;

        let message_id = format!("smtp_{}", Uuid::new_v4());
        info!(
            recipient = %mask_email(recipient),
            message_id = %message_id,
            "Verification email accepted by relay"
        );

        Ok(message_id)
    }
}
