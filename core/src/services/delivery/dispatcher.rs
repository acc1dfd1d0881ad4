//! Long-running queue consumer for verification delivery

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use vr_shared::utils::validation::mask_email;

use crate::errors::{DeliveryError, DispatchError};
use crate::services::verification::{CodeStore, JobQueue, Mailer};

use super::config::{DeliveryPolicy, DispatcherConfig};
use super::task;

/// Queue consumer that drains delivery jobs for the process lifetime
///
/// Each iteration blocks on the queue, spawns one delivery task for the
/// popped job and waits for it to finish before popping again. Keeping a
/// single job in flight bounds transport usage to one send at a time and
/// keeps delivery order equal to dequeue order.
pub struct Dispatcher {
    queue: Arc<dyn JobQueue>,
    store: Arc<dyn CodeStore>,
    mailer: Arc<dyn Mailer>,
    config: DispatcherConfig,
    /// Transport attempts per address, used only by the requeue policy
    attempts: Mutex<HashMap<String, u32>>,
}

impl Dispatcher {
    /// Create a new dispatcher over explicit collaborators
    pub fn new(
        queue: Arc<dyn JobQueue>,
        store: Arc<dyn CodeStore>,
        mailer: Arc<dyn Mailer>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            queue,
            store,
            mailer,
            config,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Consume the queue until cancellation or an unrecoverable queue error
    ///
    /// A pop that times out with nothing available is expected and the loop
    /// keeps waiting. Any other queue error terminates the loop and is
    /// surfaced to the caller; per-job delivery failures never do.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), DispatchError> {
        info!(event = "worker_started", "Delivery worker started");

        loop {
            let address = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(event = "worker_stopped", "Delivery worker shutting down");
                    return Ok(());
                }
                popped = self.queue.blocking_pop(self.config.pop_timeout) => {
                    match popped {
                        Ok(Some(address)) => address,
                        // Idle timeout; keep waiting
                        Ok(None) => continue,
                        Err(reason) => {
                            error!(
                                error = %reason,
                                event = "queue_unavailable",
                                "Delivery worker terminating"
                            );
                            return Err(DispatchError::QueueUnavailable { reason });
                        }
                    }
                }
            };

            self.dispatch(address).await;
        }
    }

    /// Run one delivery task to completion and apply the failure policy
    async fn dispatch(&self, address: String) {
        let store = Arc::clone(&self.store);
        let mailer = Arc::clone(&self.mailer);
        let handle = tokio::spawn(task::deliver(store, mailer, address.clone()));

        // Single job in flight: wait for the task before the next pop
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!(
                    address = %mask_email(&address),
                    error = %join_error,
                    event = "delivery_task_panicked",
                    "Delivery task aborted"
                );
                self.clear_attempts(&address);
                return;
            }
        };

        match outcome {
            Ok(()) => self.clear_attempts(&address),
            Err(DeliveryError::CodeNotFound { address }) => {
                // The code is gone; retrying cannot succeed
                warn!(
                    address = %mask_email(&address),
                    event = "code_not_found",
                    "No verification code for job, skipping"
                );
                self.clear_attempts(&address);
            }
            Err(DeliveryError::Transport { address, reason }) => {
                warn!(
                    address = %mask_email(&address),
                    error = %reason,
                    event = "delivery_failed",
                    "Verification delivery failed"
                );
                self.handle_transport_failure(address).await;
            }
        }
    }

    /// Apply the configured policy to a failed transport attempt
    async fn handle_transport_failure(&self, address: String) {
        let (max_attempts, backoff) = match self.config.policy {
            DeliveryPolicy::Drop => return,
            DeliveryPolicy::Requeue {
                max_attempts,
                backoff,
            } => (max_attempts, backoff),
        };

        let attempt = {
            let mut attempts = self
                .attempts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let entry = attempts.entry(address.clone()).or_insert(0);
            *entry += 1;
            *entry
        };

        if attempt >= max_attempts {
            error!(
                address = %mask_email(&address),
                attempts = attempt,
                event = "delivery_abandoned",
                "Delivery attempts exhausted, dropping job"
            );
            self.clear_attempts(&address);
            return;
        }

        let delay = backoff * attempt;
        info!(
            address = %mask_email(&address),
            attempt = attempt,
            delay_secs = delay.as_secs(),
            event = "delivery_requeued",
            "Requeueing failed delivery"
        );

        // Delayed off the loop so the worker keeps draining meanwhile
        let queue = Arc::clone(&self.queue);
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Err(reason) = queue.enqueue(&address).await {
                error!(
                    address = %mask_email(&address),
                    error = %reason,
                    event = "requeue_failed",
                    "Could not requeue failed delivery"
                );
            }
        });
    }

    fn clear_attempts(&self, address: &str) {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(address);
    }
}
