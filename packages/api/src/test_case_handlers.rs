// ABOUTME: HTTP request handlers for test case generation and saved test case sets
// ABOUTME: Also renders Markdown exports for saved sets and for unsaved generation results

use axum::{
    extract::{Path, State},
    response::Response,
};
use chrono::Utc;
use prdforge_core::types::{TestCase, TestCaseSet};
use prdforge_core::utils::{generate_id, now_millis};
use prdforge_generation::{export_service, GeneratedTestCases, TestCaseRequest};
use serde::Deserialize;
use tracing::info;

use crate::error::{fallback, ApiError};
use crate::extract::ApiJson;
use crate::prd_handlers::DeletedResponse;
use crate::response::{download, ok, ApiResult};
use crate::state::AppState;

const DEFAULT_SET_TITLE: &str = "테스트 케이스";

/// Generate test cases from PRD, PR analysis, and design context
pub async fn generate_test_cases(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TestCaseRequest>,
) -> ApiResult<GeneratedTestCases> {
    info!("Generating test cases");

    let generated = state
        .test_case_generator
        .generate(request)
        .await
        .map_err(|e| ApiError::from_generation(e, fallback::TEST_CASES))?;

    ok(generated)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCaseSetRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    pub prd_id: Option<String>,
    pub pr_analysis_id: Option<String>,
    #[serde(default)]
    pub test_types: Vec<String>,
}

pub async fn create_test_case_set(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTestCaseSetRequest>,
) -> ApiResult<TestCaseSet> {
    if request.test_cases.is_empty() {
        return Err(ApiError::BadRequest(
            "저장할 테스트 케이스가 없습니다".to_string(),
        ));
    }

    let title = match request.title.trim() {
        "" => DEFAULT_SET_TITLE.to_string(),
        title => title.to_string(),
    };
    info!(
        "Saving test case set '{}' with {} cases",
        title,
        request.test_cases.len()
    );

    // Referenced records must exist; a blank id means no source was chosen
    let prd_id = match non_blank(request.prd_id) {
        Some(id) => Some(state.prds.get(&id).await?.id),
        None => None,
    };
    let pr_analysis_id = match non_blank(request.pr_analysis_id) {
        Some(id) => Some(state.pr_analyses.get(&id).await?.id),
        None => None,
    };

    let set = TestCaseSet {
        id: generate_id("tcs"),
        title,
        test_cases: request.test_cases,
        prd_id,
        pr_analysis_id,
        test_types: request.test_types,
        created_at: Utc::now(),
    };

    ok(state.test_case_sets.create(&set).await?)
}

fn non_blank(id: Option<String>) -> Option<String> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}

pub async fn list_test_case_sets(State(state): State<AppState>) -> ApiResult<Vec<TestCaseSet>> {
    info!("Listing saved test case sets");
    ok(state.test_case_sets.list().await?)
}

pub async fn get_test_case_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TestCaseSet> {
    info!("Getting test case set {}", id);
    ok(state.test_case_sets.get(&id).await?)
}

pub async fn delete_test_case_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResponse> {
    info!("Deleting test case set {}", id);
    state.test_case_sets.delete(&id).await?;
    ok(DeletedResponse { id })
}

pub async fn export_test_case_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let set = state.test_case_sets.get(&id).await?;
    Ok(download(export_service::export_test_cases(
        Some(&set.title),
        &set.test_cases,
        &set.created_at,
        now_millis(),
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTestCasesRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Export freshly generated cases without saving them first
pub async fn export_test_cases(ApiJson(request): ApiJson<ExportTestCasesRequest>) -> Response {
    download(export_service::export_test_cases(
        request.title.as_deref(),
        &request.test_cases,
        &Utc::now(),
        now_millis(),
    ))
}
