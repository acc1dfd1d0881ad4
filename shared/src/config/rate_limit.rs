//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Admission control configuration
///
/// Every client key gets an identical token bucket; there is no per-key
/// tiering. The eviction settings bound the number of tracked keys so the
/// bucket map cannot grow without limit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable admission control
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Tokens restored per second per key
    #[serde(default = "default_refill_per_second")]
    pub refill_per_second: f64,

    /// Maximum burst size per key
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// Seconds a full, untouched bucket may sit before the sweep removes it
    #[serde(default = "default_idle_eviction_seconds")]
    pub idle_eviction_seconds: u64,

    /// Interval between eviction sweeps in seconds
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Hard cap on distinct tracked keys
    #[serde(default = "default_max_keys")]
    pub max_keys: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            refill_per_second: default_refill_per_second(),
            burst: default_burst(),
            idle_eviction_seconds: default_idle_eviction_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            max_keys: default_max_keys(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            refill_per_second: std::env::var("RATE_LIMIT_REFILL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refill_per_second),
            burst: std::env::var("RATE_LIMIT_BURST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.burst),
            idle_eviction_seconds: std::env::var("RATE_LIMIT_IDLE_EVICTION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.idle_eviction_seconds),
            sweep_interval_seconds: std::env::var("RATE_LIMIT_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_seconds),
            max_keys: std::env::var("RATE_LIMIT_MAX_KEYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_keys),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_refill_per_second() -> f64 {
    1.0
}

fn default_burst() -> u32 {
    5
}

fn default_idle_eviction_seconds() -> u64 {
    600 // 10 minutes
}

fn default_sweep_interval_seconds() -> u64 {
    60 // 1 minute
}

fn default_max_keys() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.refill_per_second, 1.0);
        assert_eq!(config.burst, 5);
        assert_eq!(config.max_keys, 10_000);
    }
}
