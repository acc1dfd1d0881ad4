//! VerifyRelay process entrypoint
//!
//! Runs the HTTP surface and the background delivery worker in one process,
//! sharing a single shutdown signal. The worker is joined after the server
//! exits so no popped job is abandoned beyond normal crash semantics.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use vr_api::{app, middleware::RateLimit};
use vr_core::services::delivery::{Dispatcher, DispatcherConfig};
use vr_core::services::rate_limit::RateLimiter;
use vr_core::services::verification::{VerificationConfig, VerificationService};
use vr_infra::cache::{RedisClient, RedisCodeStore};
use vr_infra::mail::create_mailer;
use vr_infra::queue::RedisJobQueue;
use vr_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Starting VerifyRelay API server");

    // Shared store and queue handles are explicit dependencies, injected at
    // construction
    let redis = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisCodeStore::new(redis.clone()));
    let queue = Arc::new(RedisJobQueue::new(redis, config.queue.queue_key.clone()).await?);
    let mailer = create_mailer(&config.mail);

    let verification = web::Data::new(VerificationService::new(
        store.clone(),
        queue.clone(),
        VerificationConfig::default(),
    ));

    let shutdown = CancellationToken::new();

    // One dispatcher for the process lifetime
    let dispatcher = Arc::new(Dispatcher::new(
        queue,
        store,
        mailer,
        DispatcherConfig::from(&config.queue),
    ));
    let worker = tokio::spawn({
        let dispatcher = Arc::clone(&dispatcher);
        let token = shutdown.clone();
        async move { dispatcher.run(token).await }
    });

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    tokio::spawn({
        let limiter = Arc::clone(&limiter);
        let token = shutdown.clone();
        async move {
            let mut interval = tokio::time::interval(limiter.sweep_interval());
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        limiter.sweep_idle();
                    }
                }
            }
        }
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let server_limiter = Arc::clone(&limiter);
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RateLimit::new(server_limiter.clone()))
            .app_data(verification.clone())
            .configure(app::configure)
    })
    .bind(&bind_address)?;

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    // HTTP surface is down; stop the worker and report how it ended
    shutdown.cancel();
    match worker.await {
        Ok(Ok(())) => info!("Delivery worker stopped cleanly"),
        Ok(Err(e)) => error!(error = %e, "Delivery worker terminated with error"),
        Err(e) => error!(error = %e, "Delivery worker task failed"),
    }

    Ok(())
}
