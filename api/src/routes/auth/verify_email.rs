//! Handler for POST /api/v1/auth/verify-email

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use vr_core::services::verification::VerificationService;

use crate::dto::auth::{MessageResponse, VerifyEmailRequest};

/// Validate a verification code, consuming it on success
pub async fn verify_email(
    service: web::Data<VerificationService>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse {
    match service.verify_code(&request.email, &request.code).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Email verified successfully")),
        Ok(false) => HttpResponse::Unauthorized().json(json!({
            "error": "invalid_code",
            "message": "Invalid or expired verification code",
        })),
        Err(e) => {
            error!(error = %e, "Failed to verify code");
            HttpResponse::InternalServerError().json(json!({
                "error": "internal_error",
                "message": "Error verifying code",
            }))
        }
    }
}
