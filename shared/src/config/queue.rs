//! Delivery queue and worker configuration module

use serde::{Deserialize, Serialize};

/// What the worker does with a job whose delivery attempt failed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum DeliveryPolicyConfig {
    /// Log the failure and move on; the job is gone
    Drop,
    /// Push the job back onto the queue after a delay, up to a bounded
    /// number of attempts
    Requeue {
        /// Total attempts per job before it is dropped
        max_attempts: u32,
        /// Base delay between attempts in seconds, scaled by attempt count
        backoff_seconds: u64,
    },
}

impl Default for DeliveryPolicyConfig {
    fn default() -> Self {
        DeliveryPolicyConfig::Drop
    }
}

/// Delivery queue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueConfig {
    /// Redis list key holding pending delivery jobs
    #[serde(default = "default_queue_key")]
    pub queue_key: String,

    /// Blocking pop timeout in seconds; 0 blocks indefinitely
    #[serde(default)]
    pub pop_timeout_seconds: u64,

    /// Failure handling policy
    #[serde(default)]
    pub delivery_policy: DeliveryPolicyConfig,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue_key: default_queue_key(),
            pop_timeout_seconds: 0,
            delivery_policy: DeliveryPolicyConfig::default(),
        }
    }
}

impl QueueConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let queue_key =
            std::env::var("QUEUE_KEY").unwrap_or_else(|_| default_queue_key());
        let pop_timeout_seconds = std::env::var("QUEUE_POP_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0);

        let delivery_policy = match std::env::var("DELIVERY_POLICY").as_deref() {
            Ok("requeue") => DeliveryPolicyConfig::Requeue {
                max_attempts: std::env::var("DELIVERY_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .unwrap_or(3),
                backoff_seconds: std::env::var("DELIVERY_BACKOFF_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
            _ => DeliveryPolicyConfig::Drop,
        };

        Self {
            queue_key,
            pop_timeout_seconds,
            delivery_policy,
        }
    }
}

fn default_queue_key() -> String {
    "email_verification_queue".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_default() {
        let config = QueueConfig::default();
        assert_eq!(config.queue_key, "email_verification_queue");
        assert_eq!(config.pop_timeout_seconds, 0);
        assert_eq!(config.delivery_policy, DeliveryPolicyConfig::Drop);
    }
}
