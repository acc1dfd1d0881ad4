//! Mail transport configuration module

use serde::{Deserialize, Serialize};

/// Outbound mail configuration
///
/// The `provider` field selects the transport implementation:
/// "smtp" for a real relay, "mock" for console output in development.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("smtp", "mock")
    pub provider: String,

    /// SMTP relay hostname
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username; also used as the From address
    pub smtp_user: String,

    /// SMTP password
    pub smtp_password: String,

    /// Require TLS to the relay
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_user: "noreply@localhost".to_string(),
            smtp_password: String::new(),
            use_tls: default_use_tls(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            smtp_user: std::env::var("SMTP_USER")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or_else(|_| default_use_tls()),
        }
    }
}

fn default_use_tls() -> bool {
    true
}
