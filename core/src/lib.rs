//! # VerifyRelay Core
//!
//! Core domain layer for the VerifyRelay backend. This crate contains the
//! verification code entity, the collaborator traits for the code store, job
//! queue and mail transport, the delivery dispatcher, and the admission
//! limiter that gates inbound requests.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
