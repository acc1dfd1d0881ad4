//! Traits for the code store, job queue and mail transport collaborators

use async_trait::async_trait;
use std::time::Duration;

/// Trait for the verification code store
///
/// Backed by a key/value store with per-key expiry; the store owns TTL
/// evaluation.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a code for an address, overwriting any previous entry and
    /// resetting the expiry
    async fn store_code(&self, address: &str, code: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Fetch the live code for an address, or `None` if absent or expired
    async fn get_code(&self, address: &str) -> Result<Option<String>, String>;
    /// Remove the entry for an address; returns whether one existed
    async fn remove_code(&self, address: &str) -> Result<bool, String>;
}

/// Trait for the delivery job queue
///
/// FIFO hand-off between the request path (producer) and the background
/// worker (consumer). A popped value is removed atomically.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Append a job to the tail of the queue
    async fn enqueue(&self, address: &str) -> Result<(), String>;
    /// Pop the next job from the head of the queue, waiting up to `timeout`
    /// for one to arrive. A zero timeout blocks indefinitely. `Ok(None)`
    /// means the wait timed out with nothing available, which is expected
    /// and not an error.
    async fn blocking_pop(&self, timeout: Duration) -> Result<Option<String>, String>;
}

/// Trait for the outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a verification code to a recipient; returns a provider message id
    async fn send_verification_code(&self, recipient: &str, code: &str) -> Result<String, String>;
}
