// ABOUTME: HTTP request handlers for PRD generation, chat refinement, and saved PRDs
// ABOUTME: Generation falls back to a mock PRD, chat needs a configured provider

use axum::{
    extract::{Path, State},
    response::Response,
};
use prdforge_core::types::{PrdInput, PrdRecord};
use prdforge_core::utils::now_millis;
use prdforge_generation::{export_service, ChatReply};
use prdforge_prompts::PromptKind;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{fallback, ApiError};
use crate::extract::ApiJson;
use crate::prompt_handlers::{active_prompt, ActivePrompt};
use crate::response::{download, ok, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePrdRequest {
    #[serde(flatten)]
    pub input: PrdInput,
    pub custom_prompt: Option<String>,
}

/// Generate a PRD from the product form
pub async fn generate_prd(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GeneratePrdRequest>,
) -> ApiResult<PrdRecord> {
    info!("Generating PRD for '{}'", request.input.title);

    let record = state
        .prd_generator
        .generate(request.input, request.custom_prompt.as_deref())
        .await
        .map_err(|e| ApiError::from_generation(e, fallback::PRD_GENERATION))?;

    ok(record)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub prd_id: String,
    pub message: String,
}

/// Ask a question about a saved PRD or request a revision
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<ChatReply> {
    info!("PRD chat for {}", request.prd_id);

    let reply = state
        .prd_chat
        .send(&request.prd_id, &request.message)
        .await
        .map_err(|e| ApiError::from_generation(e, fallback::CHAT))?;

    ok(reply)
}

/// The PRD generation prompt currently in effect
pub async fn get_prd_prompt(State(state): State<AppState>) -> ApiResult<ActivePrompt> {
    ok(active_prompt(&state, PromptKind::PrdGeneration).await?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub id: String,
}

pub async fn list_prds(State(state): State<AppState>) -> ApiResult<Vec<PrdRecord>> {
    info!("Listing saved PRDs");
    ok(state.prds.list().await?)
}

pub async fn get_prd(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PrdRecord> {
    info!("Getting PRD {}", id);
    ok(state.prds.get(&id).await?)
}

pub async fn delete_prd(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    info!("Deleting PRD {}", id);
    state.prds.delete(&id).await?;
    ok(DeletedResponse { id })
}

/// Download a saved PRD as Markdown
pub async fn export_prd(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let prd = state.prds.get(&id).await?;
    Ok(download(export_service::export_prd(&prd, now_millis())))
}
