//! Application route wiring shared by the binary and the tests

use actix_web::{web, HttpResponse};

use crate::routes;

/// Register all routes on a service config
///
/// The admission middleware is wrapped by the caller so tests can tune the
/// limiter independently of the route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/send-code", web::post().to(routes::auth::send_code))
                .route("/verify-email", web::post().to(routes::auth::verify_email)),
        ),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "verify-relay-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
