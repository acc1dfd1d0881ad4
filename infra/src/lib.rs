//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VerifyRelay
//! application. It provides the concrete collaborators behind the core
//! traits:
//!
//! - **Cache**: Redis client and the verification code store
//! - **Queue**: Redis-list delivery queue with blocking consumption
//! - **Mail**: SMTP transport (lettre) and a mock for development

pub mod cache;
pub mod mail;
pub mod queue;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache or queue error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail transport error: {0}")]
    Mail(String),
}
