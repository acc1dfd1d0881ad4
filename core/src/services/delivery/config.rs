//! Dispatcher configuration

use std::time::Duration;

use vr_shared::config::{DeliveryPolicyConfig, QueueConfig};

/// What to do with a job whose transport attempt failed
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryPolicy {
    /// Log and move on; the job is gone
    Drop,
    /// Push the job back after a delay, up to `max_attempts` total tries
    Requeue {
        max_attempts: u32,
        backoff: Duration,
    },
}

/// Configuration for the delivery dispatcher
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// How long a single blocking pop waits; zero blocks indefinitely
    pub pop_timeout: Duration,
    /// Failure handling policy for transport errors
    pub policy: DeliveryPolicy,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pop_timeout: Duration::ZERO,
            policy: DeliveryPolicy::Drop,
        }
    }
}

impl From<&QueueConfig> for DispatcherConfig {
    fn from(config: &QueueConfig) -> Self {
        let policy = match &config.delivery_policy {
            DeliveryPolicyConfig::Drop => DeliveryPolicy::Drop,
            DeliveryPolicyConfig::Requeue {
                max_attempts,
                backoff_seconds,
            } => DeliveryPolicy::Requeue {
                max_attempts: (*max_attempts).max(1),
                backoff: Duration::from_secs(*backoff_seconds),
            },
        };

        Self {
            pop_timeout: Duration::from_secs(config.pop_timeout_seconds),
            policy,
        }
    }
}
