// ABOUTME: HTTP request handler importing a Figma file as test case context
// ABOUTME: Returns the parsed design and its prompt-ready Markdown summary

use axum::extract::State;
use prdforge_integrations::{
    extract_figma_file_key, format_figma_info_for_prompt, parse_figma_design, FigmaDesignInfo,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, FIGMA_FETCH_FAILED, FIGMA_TOKEN_MISSING, FIGMA_URL_REQUIRED, INVALID_FIGMA_URL};
use crate::extract::ApiJson;
use crate::response::{ok, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFetchRequest {
    #[serde(default)]
    pub figma_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFetchResponse {
    pub file_key: String,
    pub file_name: String,
    pub design_info: FigmaDesignInfo,
    pub formatted_info: String,
}

pub async fn fetch_figma(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FigmaFetchRequest>,
) -> ApiResult<FigmaFetchResponse> {
    let url = request.figma_url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest(FIGMA_URL_REQUIRED.to_string()));
    }

    let file_key = extract_figma_file_key(url)
        .ok_or_else(|| ApiError::BadRequest(INVALID_FIGMA_URL.to_string()))?;
    let client = state
        .figma
        .as_ref()
        .ok_or_else(|| ApiError::Internal(FIGMA_TOKEN_MISSING.to_string()))?;

    info!("Importing Figma file {}", file_key);
    let file = client
        .fetch_file(&file_key)
        .await
        .map_err(|e| ApiError::from_integration(e, FIGMA_FETCH_FAILED))?;

    let design_info = parse_figma_design(&file);
    let formatted_info = format_figma_info_for_prompt(&design_info);
    info!(
        "Figma file '{}' has {} screens and {} components",
        file.name,
        design_info.screens.len(),
        design_info.components.len()
    );

    ok(FigmaFetchResponse {
        file_key,
        file_name: file.name,
        design_info,
        formatted_info,
    })
}
