//! # Sylva Web Gateway
//!
//! Entry point of the actix-web server: access control in front of the
//! article, plant bible, garden and auth pages.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

#[cfg(test)]
mod testing;

use config::GatewayConfig;
use middleware::access::AccessGuard;
use observability::RequestIdHeader;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = GatewayConfig::from_env();
    tracing::info!(
        "Starting Sylva web gateway on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config);

    HttpServer::new(move || {
        App::new()
            .wrap(AccessGuard::new(state.policy.clone()))
            .wrap(RequestIdHeader)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server error")
}
