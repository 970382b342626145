// ABOUTME: HTTP error type mapping domain failures to status codes and Korean messages
// ABOUTME: Every failure renders the standard envelope with success=false

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prdforge_ai::AIServiceError;
use prdforge_generation::GenerationError;
use prdforge_integrations::IntegrationError;
use prdforge_storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ApiResponse;

pub const INVALID_PR_URL: &str = "유효하지 않은 GitHub PR URL입니다";
pub const PR_NOT_FOUND: &str = "PR을 찾을 수 없습니다. URL을 확인해주세요.\n\
- Private 저장소인 경우 GitHub 토큰에 'repo' 권한이 필요합니다.\n\
- URL 형식: https://github.com/owner/repo/pull/123";
pub const GITHUB_UNAUTHORIZED: &str = "GitHub 토큰이 유효하지 않습니다. 토큰을 확인해주세요.";
pub const NO_API_KEY: &str = "API 키가 설정되지 않았습니다";
pub const FIGMA_URL_REQUIRED: &str = "Figma URL이 필요합니다.";
pub const INVALID_FIGMA_URL: &str = "유효하지 않은 Figma URL입니다. 예: https://www.figma.com/file/...";
pub const FIGMA_TOKEN_MISSING: &str = "Figma 액세스 토큰이 설정되지 않았습니다.";
pub const FIGMA_FETCH_FAILED: &str = "Figma 파일을 가져오는 중 오류가 발생했습니다.";
pub const BAD_REQUEST: &str = "잘못된 요청입니다";
pub const NOT_FOUND: &str = "요청한 데이터를 찾을 수 없습니다";
pub const STORAGE_FAILED: &str = "데이터 처리 중 오류가 발생했습니다";

/// Generic failure text per feature
pub mod fallback {
    pub const PRD_GENERATION: &str = "PRD 생성 중 오류가 발생했습니다";
    pub const PR_ANALYSIS: &str = "PR 분석 중 오류가 발생했습니다";
    pub const TEST_CASES: &str = "테스트 케이스 생성 중 오류가 발생했습니다";
    pub const CHAT: &str = "채팅 처리 중 오류가 발생했습니다";
    pub const PROMPT_TEST: &str = "프롬프트 테스트 중 오류가 발생했습니다";
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a generation failure, using `fallback` when nothing more specific applies
    pub fn from_generation(err: GenerationError, fallback: &str) -> Self {
        match err {
            GenerationError::InvalidInput(message) => ApiError::BadRequest(message),
            GenerationError::NoProviderConfigured => ApiError::Internal(NO_API_KEY.to_string()),
            GenerationError::Storage(e) => e.into(),
            GenerationError::Integration(e) => Self::from_integration(e, fallback),
            GenerationError::AIService(e) => Self::from_ai(e, fallback),
            GenerationError::Prompt(e) => {
                error!("Prompt resolution failed: {}", e);
                ApiError::Internal(fallback.to_string())
            }
        }
    }

    pub fn from_ai(err: AIServiceError, fallback: &str) -> Self {
        if matches!(err, AIServiceError::NoProviderConfigured | AIServiceError::NoApiKey) {
            return ApiError::Internal(NO_API_KEY.to_string());
        }
        error!("AI provider call failed: {}", err);
        ApiError::Internal(err.user_message(fallback))
    }

    pub fn from_integration(err: IntegrationError, fallback: &str) -> Self {
        match err {
            IntegrationError::InvalidPrUrl(_) => ApiError::BadRequest(INVALID_PR_URL.to_string()),
            IntegrationError::PrNotFound(_) => ApiError::NotFound(PR_NOT_FOUND.to_string()),
            IntegrationError::Unauthorized => {
                ApiError::Unauthorized(GITHUB_UNAUTHORIZED.to_string())
            }
            IntegrationError::GitHub(message) => {
                ApiError::Internal(format!("GitHub API 오류: {}", message))
            }
            IntegrationError::InvalidFigmaUrl(_) => {
                ApiError::BadRequest(INVALID_FIGMA_URL.to_string())
            }
            IntegrationError::MissingFigmaToken => {
                ApiError::Internal(FIGMA_TOKEN_MISSING.to_string())
            }
            e @ IntegrationError::Figma { .. } => ApiError::Internal(e.to_string()),
            IntegrationError::Request(e) => {
                error!("Upstream request failed: {}", e);
                ApiError::Internal(fallback.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => {
                warn!("Not found: {}", what);
                ApiError::NotFound(NOT_FOUND.to_string())
            }
            StorageError::InvalidInput(message) => {
                ApiError::BadRequest(format!("{}: {}", BAD_REQUEST, message))
            }
            other => {
                error!("Storage failure: {}", other);
                ApiError::Internal(STORAGE_FAILED.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
