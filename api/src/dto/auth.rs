//! Auth endpoint request/response types

use serde::{Deserialize, Serialize};

/// Request body for POST /api/v1/auth/send-code
#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    /// Address to stage a verification code for
    pub email: String,
}

/// Request body for POST /api/v1/auth/verify-email
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    /// Address the code was staged for
    pub email: String,
    /// The 6-digit code the user received
    pub code: String,
}

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
