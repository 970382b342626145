// ABOUTME: Error type for AI provider calls and its user-facing categorization
// ABOUTME: Provider errors are classified by message content into key, quota, overload, or unknown

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("No AI provider configured")]
    NoProviderConfigured,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidApiKey,
    QuotaExceeded,
    Overloaded,
    Unknown,
}

impl ErrorCategory {
    /// Classify a provider error message
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("api key") {
            ErrorCategory::InvalidApiKey
        } else if lower.contains("quota") {
            ErrorCategory::QuotaExceeded
        } else if lower.contains("overloaded") || lower.contains("503") {
            ErrorCategory::Overloaded
        } else {
            ErrorCategory::Unknown
        }
    }

    /// Korean message shown to the user, or `None` for uncategorized failures
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ErrorCategory::InvalidApiKey => Some("API 키가 유효하지 않습니다. 관리자에게 문의하세요."),
            ErrorCategory::QuotaExceeded => {
                Some("API 사용량 한도를 초과했습니다. 잠시 후 다시 시도해주세요.")
            }
            ErrorCategory::Overloaded => {
                Some("서버가 일시적으로 과부하 상태입니다. 잠시 후 다시 시도해주세요.")
            }
            ErrorCategory::Unknown => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Overloaded)
    }
}

impl AIServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AIServiceError::ApiError { status: 503, .. } => ErrorCategory::Overloaded,
            AIServiceError::NoProviderConfigured => ErrorCategory::Unknown,
            other => ErrorCategory::from_message(&other.to_string()),
        }
    }

    /// Categorized Korean message, falling back to the feature's generic failure text
    pub fn user_message(&self, fallback: &str) -> String {
        self.category()
            .user_message()
            .unwrap_or(fallback)
            .to_string()
    }
}
