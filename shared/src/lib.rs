//! Shared utilities and common types for the VerifyRelay server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (address validation, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DeliveryPolicyConfig, MailConfig, QueueConfig, RateLimitConfig,
    ServerConfig,
};
pub use utils::validation;
