// ABOUTME: AI provider integration and usage tracking
// ABOUTME: Gemini and OpenAI clients behind a retrying, falling-back generation pipeline

pub mod error;
pub mod gemini;
pub mod openai;
pub mod pipeline;
pub mod retry;
pub mod service;
pub mod usage_logs;

pub use error::{AIServiceError, AIServiceResult, ErrorCategory};
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use pipeline::{GenerationPipeline, PipelineOutput};
pub use retry::{with_retry, RetryPolicy};
pub use service::{AIResponse, GenerationSettings, TextGenerator, Usage};
pub use usage_logs::{
    calculate_gemini_cost, calculate_openai_cost, estimate_cost, estimate_tokens, DailyUsage,
    UsageBreakdown, UsageRecord, UsageStorage, UsageSummary,
};
