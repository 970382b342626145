// ABOUTME: HTTP request handlers for API usage statistics
// ABOUTME: Summary by service and endpoint, raw daily buckets, and reset

use axum::extract::State;
use prdforge_ai::{UsageRecord, UsageSummary};
use serde::Serialize;
use tracing::info;

use crate::response::{ok, ApiResult};
use crate::state::AppState;

pub async fn get_summary(State(state): State<AppState>) -> ApiResult<UsageSummary> {
    info!("Getting API usage summary");
    ok(state.usage.summary().await?)
}

pub async fn list_records(State(state): State<AppState>) -> ApiResult<Vec<UsageRecord>> {
    info!("Listing API usage records");
    ok(state.usage.list().await?)
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub deleted: u64,
}

pub async fn reset_usage(State(state): State<AppState>) -> ApiResult<ResetResponse> {
    let deleted = state.usage.reset().await?;
    info!("Reset API usage, removed {} records", deleted);
    ok(ResetResponse { deleted })
}
