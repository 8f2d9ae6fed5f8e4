mod catalog;
mod config;
mod error;
mod gateway;
mod handlers;
mod mapper;
mod models;
mod prompts;
mod routes;
mod service;
mod state;
mod upload;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let default_filter = if settings.debug {
        "refugee_assist=debug,tower_http=debug"
    } else {
        "refugee_assist=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting Refugee Assistance API v{}", env!("CARGO_PKG_VERSION"));
    info!("Vision model: {}", settings.vision_model);
    info!("Text model: {}", settings.text_model);
    info!(
        "Upload limit: {} bytes, image types: {}",
        settings.max_file_size,
        settings.allowed_image_types.join(", ")
    );
    info!(
        "Access tokens expire after {} minutes",
        settings.access_token_expire_minutes
    );
    if !settings.api_key_configured() {
        warn!("OPENROUTER_API_KEY is not set; model endpoints will fail and readiness reports not_ready");
    }

    let addr = format!("{}:{}", settings.host, settings.port);
    let app = routes::build_app(AppState::new(settings));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
