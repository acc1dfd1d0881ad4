//! Verification staging service implementation

use std::sync::Arc;

use tracing::{info, warn};
use vr_shared::utils::validation::{is_valid_email, mask_email};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult};

use super::config::VerificationConfig;
use super::traits::{CodeStore, JobQueue};

/// Verification service for staging and consuming e-mail codes
///
/// Staging is fire-and-forget relative to the caller: the code is written to
/// the store, the address is appended to the delivery queue, and the actual
/// send happens later on the worker.
pub struct VerificationService {
    /// Code store for staged entries
    store: Arc<dyn CodeStore>,
    /// Delivery queue feeding the background worker
    queue: Arc<dyn JobQueue>,
    /// Service configuration
    config: VerificationConfig,
}

impl VerificationService {
    /// Create a new verification service
    pub fn new(
        store: Arc<dyn CodeStore>,
        queue: Arc<dyn JobQueue>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            store,
            queue,
            config,
        }
    }

    /// Stage a verification code for an address and enqueue its delivery
    ///
    /// Overwrites any previously staged code for the address and resets the
    /// TTL, so only the newest code is ever live.
    ///
    /// # Arguments
    ///
    /// * `email` - The address to stage a code for
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - The staged code entity
    /// * `Err(DomainError)` - If validation, storage or enqueueing fails
    pub async fn stage(&self, email: &str) -> DomainResult<VerificationCode> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", mask_email(email)),
            });
        }

        let verification_code = VerificationCode::new_with_expiration(
            email.to_string(),
            self.config.code_expiration_minutes,
        );

        self.store
            .store_code(
                email,
                &verification_code.code,
                verification_code.ttl_seconds(),
            )
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to store verification code: {}", e),
            })?;

        self.queue
            .enqueue(email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to enqueue delivery job: {}", e),
            })?;

        info!(
            address = %mask_email(email),
            event = "code_staged",
            session_id = %verification_code.id,
            "Verification code staged and delivery enqueued"
        );

        Ok(verification_code)
    }

    /// Validate a code for an address, consuming the entry on success
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The code matched; the entry has been consumed
    /// * `Ok(false)` - No live code, or the code did not match
    /// * `Err(DomainError)` - If the store failed
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<bool> {
        let stored = self
            .store
            .get_code(email)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read verification code: {}", e),
            })?;

        let stored = match stored {
            Some(stored) => stored,
            None => {
                warn!(
                    address = %mask_email(email),
                    event = "code_missing",
                    "No live verification code for address"
                );
                return Ok(false);
            }
        };

        if stored != code {
            warn!(
                address = %mask_email(email),
                event = "code_mismatch",
                "Verification code did not match"
            );
            return Ok(false);
        }

        // Consume the entry so the code cannot be replayed
        let _ = self.store.remove_code(email).await;

        info!(
            address = %mask_email(email),
            event = "code_verified",
            "Verification code accepted"
        );

        Ok(true)
    }
}
