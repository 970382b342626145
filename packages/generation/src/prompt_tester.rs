// ABOUTME: Dry-run of an edited prompt template from the admin screen
// ABOUTME: Substitutes free-form test input and returns the reply with the final prompt

use prdforge_ai::usage_logs::endpoints;
use prdforge_ai::{GenerationPipeline, GenerationSettings};
use prdforge_prompts::{substitute_test_input, PromptKind};
use serde::Serialize;
use tracing::info;

use crate::error::{GenerationError, Result};

pub const PROMPT_TEST_MAX_TOKENS: u32 = 1500;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTestResult {
    pub result: String,
    pub prompt_used: String,
    pub ai_provider: String,
}

pub struct PromptTester {
    pipeline: GenerationPipeline,
}

impl PromptTester {
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, kind: PromptKind, template: &str, test_input: &str) -> Result<PromptTestResult> {
        if template.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "프롬프트 템플릿을 입력해주세요".to_string(),
            ));
        }
        if !self.pipeline.has_providers() {
            return Err(GenerationError::NoProviderConfigured);
        }

        let prompt = substitute_test_input(kind, template, test_input);
        info!("Testing {} prompt ({} chars)", kind, prompt.chars().count());

        let output = self
            .pipeline
            .generate(
                endpoints::PROMPT_TEST,
                &prompt,
                &GenerationSettings::with_max_tokens(PROMPT_TEST_MAX_TOKENS),
            )
            .await?;

        Ok(PromptTestResult {
            result: output.text,
            prompt_used: prompt,
            ai_provider: output.provider,
        })
    }
}
