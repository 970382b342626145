// ABOUTME: Top-level router for the server binary
// ABOUTME: Adds the health route to the API routers and applies CORS and request tracing

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use prdforge_api::{create_api_router, AppState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ConfigError};

pub mod health;

pub fn create_router(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidCorsOrigin(config.cors_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_api_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
