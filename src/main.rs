//! # Blog API
//!
//! Entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage (PostgreSQL pool and migrations, or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use blog_api::config::Settings;
use blog_api::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    blog_api::telemetry::init_tracing();

    info!("Starting Blog API...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.storage.backend,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
