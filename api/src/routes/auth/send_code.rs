//! Handler for POST /api/v1/auth/send-code

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use vr_core::errors::DomainError;
use vr_core::services::verification::VerificationService;

use crate::dto::auth::{MessageResponse, SendCodeRequest};

/// Stage a verification code for an address and enqueue its delivery
///
/// The response returns as soon as the code is staged and the job is on the
/// queue; the actual send happens on the background worker.
pub async fn send_code(
    service: web::Data<VerificationService>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    match service.stage(&request.email).await {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new(
            "Verification code sent. Please check your email.",
        )),
        Err(DomainError::Validation { message }) => HttpResponse::BadRequest().json(json!({
            "error": "validation_error",
            "message": message,
        })),
        Err(e) => {
            error!(error = %e, "Failed to stage verification code");
            HttpResponse::InternalServerError().json(json!({
                "error": "internal_error",
                "message": "Error staging verification code",
            }))
        }
    }
}
