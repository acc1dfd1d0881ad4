//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `mail` - Outbound mail transport configuration
//! - `queue` - Delivery queue and worker configuration
//! - `rate_limit` - Per-client admission control configuration
//! - `server` - HTTP server configuration

pub mod cache;
pub mod mail;
pub mod queue;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use mail::MailConfig;
pub use queue::{DeliveryPolicyConfig, QueueConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// Delivery queue configuration
    pub queue: QueueConfig,

    /// Admission control configuration
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            mail: MailConfig::from_env(),
            queue: QueueConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            mail: MailConfig::default(),
            queue: QueueConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}
