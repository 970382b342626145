// ABOUTME: HTTP request handlers for GitHub pull request analysis and saved analyses
// ABOUTME: Maps GitHub failures to 400/401/404/500 with Korean messages

use axum::{
    extract::{Path, State},
    response::Response,
};
use prdforge_core::types::PrAnalysisRecord;
use prdforge_core::utils::now_millis;
use prdforge_generation::export_service;
use prdforge_prompts::PromptKind;
use serde::Deserialize;
use tracing::info;

use crate::error::{fallback, ApiError};
use crate::extract::ApiJson;
use crate::prd_handlers::DeletedResponse;
use crate::prompt_handlers::{active_prompt, ActivePrompt};
use crate::response::{download, ok, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
    pub custom_prompt: Option<String>,
}

/// Fetch a pull request and analyze it
pub async fn analyze_pr(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> ApiResult<PrAnalysisRecord> {
    info!("Analyzing pull request {}", request.url);

    let record = state
        .pr_analyzer
        .analyze(&request.url, request.custom_prompt.as_deref())
        .await
        .map_err(|e| ApiError::from_generation(e, fallback::PR_ANALYSIS))?;

    ok(record)
}

/// The PR analysis prompt currently in effect
pub async fn get_github_prompt(State(state): State<AppState>) -> ApiResult<ActivePrompt> {
    ok(active_prompt(&state, PromptKind::GithubPrAnalysis).await?)
}

pub async fn list_pr_analyses(State(state): State<AppState>) -> ApiResult<Vec<PrAnalysisRecord>> {
    info!("Listing saved PR analyses");
    ok(state.pr_analyses.list().await?)
}

pub async fn get_pr_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PrAnalysisRecord> {
    info!("Getting PR analysis {}", id);
    ok(state.pr_analyses.get(&id).await?)
}

pub async fn delete_pr_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    info!("Deleting PR analysis {}", id);
    state.pr_analyses.delete(&id).await?;
    ok(DeletedResponse { id })
}

pub async fn export_pr_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state.pr_analyses.get(&id).await?;
    Ok(download(export_service::export_pr_analysis(
        &record,
        now_millis(),
    )))
}
