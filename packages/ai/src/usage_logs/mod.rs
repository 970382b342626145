// ABOUTME: API usage tracking for AI providers and GitHub
// ABOUTME: Daily counters per service and endpoint plus token and cost estimation

pub mod storage;
pub mod types;

pub use storage::UsageStorage;
pub use types::{DailyUsage, UsageBreakdown, UsageRecord, UsageSummary};

/// Well-known service names
pub mod services {
    pub const GEMINI: &str = "gemini";
    pub const OPENAI: &str = "openai";
    pub const GITHUB: &str = "github";
}

/// Well-known endpoint labels
pub mod endpoints {
    pub const PRD_GENERATION: &str = "prd-generation";
    pub const PRD_CHAT: &str = "prd-chat";
    pub const PR_ANALYSIS: &str = "pr-analysis";
    pub const TEST_CASES: &str = "test-cases";
    pub const PROMPT_TEST: &str = "prompt-test";
}

/// Rough token estimate: one token per three characters, rounded up
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(3)
}

// Gemini 1.5 Flash per-million prices, assuming a 3:1 input/output split
const GEMINI_INPUT_PER_MILLION: f64 = 0.075;
const GEMINI_OUTPUT_PER_MILLION: f64 = 0.30;
// GPT-4 Turbo per-million prices, same split
const OPENAI_INPUT_PER_MILLION: f64 = 10.0;
const OPENAI_OUTPUT_PER_MILLION: f64 = 30.0;

fn split_cost(tokens: u64, input_price: f64, output_price: f64) -> f64 {
    let input_tokens = tokens as f64 * 0.75;
    let output_tokens = tokens as f64 * 0.25;
    (input_tokens / 1_000_000.0) * input_price + (output_tokens / 1_000_000.0) * output_price
}

/// Estimated USD cost of a Gemini call
pub fn calculate_gemini_cost(tokens: u64) -> f64 {
    split_cost(tokens, GEMINI_INPUT_PER_MILLION, GEMINI_OUTPUT_PER_MILLION)
}

pub fn calculate_openai_cost(tokens: u64) -> f64 {
    split_cost(tokens, OPENAI_INPUT_PER_MILLION, OPENAI_OUTPUT_PER_MILLION)
}

/// Cost estimate by service name. GitHub and unknown services are free.
pub fn estimate_cost(service: &str, tokens: u64) -> f64 {
    match service {
        services::GEMINI => calculate_gemini_cost(tokens),
        services::OPENAI => calculate_openai_cost(tokens),
        _ => 0.0,
    }
}
