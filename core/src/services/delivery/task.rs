//! Per-job delivery task

use std::sync::Arc;

use tracing::info;
use vr_shared::utils::validation::mask_email;

use crate::errors::DeliveryError;
use crate::services::verification::{CodeStore, Mailer};

/// Resolve the staged code for an address and attempt delivery
///
/// The code is looked up at delivery time rather than carried in the job,
/// so a re-staged code between enqueue and dequeue is never duplicated.
/// The task does not touch the code store beyond the read and does not
/// re-enqueue; failure handling belongs to the dispatcher.
pub(super) async fn deliver(
    store: Arc<dyn CodeStore>,
    mailer: Arc<dyn Mailer>,
    address: String,
) -> Result<(), DeliveryError> {
    let code = store
        .get_code(&address)
        .await
        .map_err(|reason| DeliveryError::Transport {
            address: address.clone(),
            reason: format!("code lookup failed: {}", reason),
        })?
        .ok_or_else(|| DeliveryError::CodeNotFound {
            address: address.clone(),
        })?;

    let message_id = mailer
        .send_verification_code(&address, &code)
        .await
        .map_err(|reason| DeliveryError::Transport {
            address: address.clone(),
            reason,
        })?;

    info!(
        address = %mask_email(&address),
        message_id = %message_id,
        event = "delivery_succeeded",
        "Verification email sent"
    );

    Ok(())
}
