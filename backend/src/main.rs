//! AgriPredict - Backend Server
//!
//! Serves the farmer dashboard: crop disease detection, profit estimation,
//! weather, mandi prices and notifications in English, Hindi and Marathi.

use std::net::SocketAddr;

use agripredict_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing; production logs are JSON lines
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "agripredict_server=debug,agripredict_backend=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting AgriPredict Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        vision_model = %config.ai.vision_model,
        text_model = %config.ai.text_model,
        "Generative models"
    );
    if config.ai.api_key.is_empty() {
        tracing::warn!("AGRI__AI__API_KEY is not set; AI endpoints will fail");
    }

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
