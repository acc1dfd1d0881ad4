//! Domain-specific error types and error handling.

use thiserror::Error;

/// Per-job delivery failures
///
/// These are terminal for the job they belong to; the dispatcher logs them
/// and moves on according to its delivery policy. They never escape the
/// task boundary.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// No live code exists for the address (expired between enqueue and
    /// dequeue, or never staged)
    #[error("no verification code staged for {address}")]
    CodeNotFound { address: String },

    /// The mail transport reported a failure
    #[error("delivery to {address} failed: {reason}")]
    Transport { address: String, reason: String },
}

/// Dispatcher-level failures
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The job queue returned an unrecoverable error. Fatal to the worker
    /// loop; the process supervisor decides whether to restart.
    #[error("job queue unavailable: {reason}")]
    QueueUnavailable { reason: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type DomainResult<T> = Result<T, DomainError>;
