//! # Yatube Web Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use web_server::config::AppConfig;
use web_server::fixtures::Fixtures;
use web_server::telemetry::{TelemetryConfig, init_telemetry};
use web_server::{AppState, configure_app};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Yatube on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await;

    if let Some(path) = &config.fixtures_path {
        Fixtures::from_file(path)?
            .load(&state)
            .await
            .context("loading fixtures")?;
    }

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("binding {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
