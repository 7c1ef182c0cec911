//! AgriPredict backend
//!
//! HTTP service for the farmer dashboard: the two model-backed flows, static
//! weather and market data, translation catalogs and location matching.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::i18n::{CatalogError, Catalogs, REQUIRED_KEYS};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
use external::GeminiClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalogs: Arc<Catalogs>,
    pub model: GeminiClient,
}

impl AppState {
    /// Load the bundled catalogs and build the model client. Fails when the
    /// English catalog lacks a required key.
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let catalogs = Catalogs::load()?;
        let report = catalogs.check(REQUIRED_KEYS)?;
        for (language, keys) in report.missing.iter().filter(|(_, keys)| !keys.is_empty()) {
            tracing::warn!(
                %language,
                missing = keys.len(),
                "Catalog incomplete, English fallback will be used: {}",
                keys.join(", ")
            );
        }

        Ok(Self {
            model: GeminiClient::from_config(&config.ai),
            config: Arc::new(config),
            catalogs: Arc::new(catalogs),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriPredict API v1"
}
