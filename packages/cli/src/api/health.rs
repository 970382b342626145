// ABOUTME: Liveness endpoint for the PRDForge server
// ABOUTME: Reports status, version, service name, and the current time

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "prdforge"
    }))
}
