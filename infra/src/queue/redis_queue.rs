//! Redis-list delivery queue
//!
//! Producers RPUSH onto the list and the worker BLPOPs from its head, which
//! gives FIFO hand-off with atomic removal: no two consumers ever observe
//! the same job.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;
use tracing::debug;

use vr_core::services::verification::JobQueue;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Delivery job queue backed by a Redis list
pub struct RedisJobQueue {
    /// Shared client for non-blocking appends
    client: RedisClient,
    /// Dedicated connection for BLPOP; a parked pop would otherwise stall
    /// every command multiplexed onto the shared connection
    blocking: Mutex<MultiplexedConnection>,
    /// List key; the client applies any configured prefix
    key: String,
}

impl RedisJobQueue {
    /// Create a queue over an existing Redis client
    pub async fn new(
        client: RedisClient,
        key: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        let blocking = client.dedicated_connection().await?;
        Ok(Self {
            client,
            blocking: Mutex::new(blocking),
            key: key.into(),
        })
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn enqueue(&self, address: &str) -> Result<(), String> {
        debug!(queue = %self.key, "Enqueueing delivery job");
        self.client
            .rpush(&self.key, address)
            .await
            .map_err(|e| e.to_string())
    }

    async fn blocking_pop(&self, timeout: Duration) -> Result<Option<String>, String> {
        // BLPOP takes whole seconds; zero blocks indefinitely
        let timeout_seconds = if timeout.is_zero() {
            0
        } else {
            timeout.as_secs().max(1)
        };

        let mut conn = self.blocking.lock().await;
        let popped: Option<(String, String)> = redis::cmd("BLPOP")
            .arg(self.client.qualified_key(&self.key))
            .arg(timeout_seconds)
            .query_async(&mut *conn)
            .await
            .map_err(|e| e.to_string())?;

        Ok(popped.map(|(_, address)| address))
    }
}
