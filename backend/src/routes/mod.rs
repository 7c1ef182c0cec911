//! Route definitions for the AgriPredict server

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Largest accepted request body on the AI routes (leaf photos)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/ai", ai_routes())
        .route("/weather/:location", get(handlers::get_weather))
        .route("/locations/nearest", get(handlers::get_nearest_location))
        .nest("/market", market_routes())
        .route("/i18n/:lang", get(handlers::get_catalog))
        .route("/notifications", get(handlers::list_notifications))
}

/// Model-backed routes
fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/disease-detection", post(handlers::detect_disease))
        .route(
            "/disease-detection/upload",
            post(handlers::upload_disease_detection),
        )
        .route("/profit-estimation", post(handlers::estimate_profit))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Market price routes
fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/prices", get(handlers::list_market_prices))
        .route("/snapshot", get(handlers::get_market_snapshot))
        .route("/trends", get(handlers::get_market_trends))
}
