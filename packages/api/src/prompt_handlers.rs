// ABOUTME: HTTP request handlers for prompt template administration
// ABOUTME: List, edit with history, duplicate, activate, and dry-run templates against the provider chain

use axum::extract::{Path, State};
use prdforge_generation::PromptTestResult;
use prdforge_prompts::{default_prompt, placeholders, PromptKind, PromptTemplate, PromptVersion};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{fallback, ApiError};
use crate::extract::ApiJson;
use crate::response::{ok, ApiResult};
use crate::state::AppState;

/// Prompt in effect for a kind, with the placeholders it expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePrompt {
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub content: String,
    pub parameters: Vec<String>,
    /// `None` when no stored template is active and the built-in default applies
    pub template_id: Option<String>,
    pub version: Option<i64>,
}

pub(crate) async fn active_prompt(state: &AppState, kind: PromptKind) -> Result<ActivePrompt, ApiError> {
    info!("Getting active {} prompt", kind);

    if let Some(template) = state.prompt_templates.active_for_kind(kind).await? {
        return Ok(ActivePrompt {
            kind,
            parameters: placeholders(&template.content),
            content: template.content,
            template_id: Some(template.id),
            version: Some(template.version),
        });
    }

    let prompt = default_prompt(kind).map_err(|e| {
        error!("Built-in {} prompt is unusable: {}", kind, e);
        ApiError::Internal("프롬프트를 불러오는 중 오류가 발생했습니다".to_string())
    })?;

    Ok(ActivePrompt {
        kind,
        parameters: placeholders(&prompt.template),
        content: prompt.template,
        template_id: None,
        version: None,
    })
}

pub async fn list_templates(State(state): State<AppState>) -> ApiResult<Vec<PromptTemplate>> {
    info!("Listing prompt templates");
    ok(state.prompt_templates.list().await?)
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PromptTemplate> {
    info!("Getting prompt template {}", id);
    ok(state.prompt_templates.get(&id).await?)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    pub content: String,
    pub change_note: Option<String>,
}

/// Replace a template body, keeping the previous body in its history
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateTemplateRequest>,
) -> ApiResult<PromptTemplate> {
    info!("Updating prompt template {}", id);
    ok(state
        .prompt_templates
        .update(&id, request.content, request.change_note)
        .await?)
}

/// Copy a template as an inactive draft of the same kind
pub async fn duplicate_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PromptTemplate> {
    info!("Duplicating prompt template {}", id);
    ok(state.prompt_templates.duplicate(&id).await?)
}

pub async fn activate_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PromptTemplate> {
    info!("Activating prompt template {}", id);
    ok(state.prompt_templates.activate(&id).await?)
}

pub async fn template_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<PromptVersion>> {
    info!("Getting history of prompt template {}", id);
    ok(state.prompt_templates.history(&id).await?)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPromptRequest {
    pub prompt_template: String,
    #[serde(default)]
    pub test_input: String,
    pub prompt_type: String,
}

/// Run an edited template once without saving it
pub async fn test_prompt(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TestPromptRequest>,
) -> ApiResult<PromptTestResult> {
    let kind: PromptKind = request.prompt_type.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "알 수 없는 프롬프트 유형입니다: {}",
            request.prompt_type
        ))
    })?;
    info!("Testing {} prompt", kind);

    let result = state
        .prompt_tester
        .run(kind, &request.prompt_template, &request.test_input)
        .await
        .map_err(|e| ApiError::from_generation(e, fallback::PROMPT_TEST))?;

    ok(result)
}
