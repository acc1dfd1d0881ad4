//! Verification staging service module
//!
//! This module covers the producer side of the delivery pipeline:
//! - Generating and staging verification codes with a fixed TTL
//! - Enqueueing delivery jobs for the background worker
//! - Validating and consuming a staged code

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::VerificationService;
pub use traits::{CodeStore, JobQueue, Mailer};
