// ABOUTME: PRD generation from the product form through the provider chain
// ABOUTME: Falls back to the mock PRD when no provider is configured or all of them fail

use std::sync::Arc;

use chrono::Utc;
use prdforge_ai::usage_logs::endpoints;
use prdforge_ai::{GenerationPipeline, GenerationSettings};
use prdforge_core::types::{PrdInput, PrdRecord};
use prdforge_core::utils::{generate_id, preview};
use prdforge_prompts::{render_with_fields, PromptKind};
use prdforge_storage::PrdStorage;
use tracing::{info, warn};

use crate::error::{GenerationError, Result};
use crate::mock::{mock_prd, MOCK_PROVIDER};
use crate::prompts::{PromptResolver, PRD_FIELDS};

pub const PRD_MAX_TOKENS: u32 = 3000;

/// Text used for `{constraints}` when the form leaves it blank
const NO_CONSTRAINTS: &str = "없음";

pub struct PrdGenerator {
    pipeline: GenerationPipeline,
    prompts: PromptResolver,
    prds: Arc<PrdStorage>,
}

impl PrdGenerator {
    pub fn new(pipeline: GenerationPipeline, prompts: PromptResolver, prds: Arc<PrdStorage>) -> Self {
        Self {
            pipeline,
            prompts,
            prds,
        }
    }

    /// Fill a PRD template with the form fields
    pub fn build_prompt(template: &str, input: &PrdInput) -> String {
        let features = input.non_empty_features().join(", ");
        render_with_fields(
            template,
            &PRD_FIELDS,
            &[
                ("title", input.title.as_str()),
                ("objectives", input.objectives.as_str()),
                ("features", features.as_str()),
                ("targetAudience", input.target_audience.as_str()),
                ("constraints", input.constraints_text().unwrap_or(NO_CONSTRAINTS)),
            ],
        )
    }

    /// Generate and save a PRD
    pub async fn generate(&self, input: PrdInput, custom_prompt: Option<&str>) -> Result<PrdRecord> {
        if input.title.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "PRD 제목을 입력해주세요".to_string(),
            ));
        }

        info!("Generating PRD '{}'", input.title);

        let (content, provider) = if self.pipeline.has_providers() {
            let template = self
                .prompts
                .resolve(PromptKind::PrdGeneration, custom_prompt)
                .await?;
            let prompt = Self::build_prompt(&template, &input);
            info!(
                "PRD prompt is {} chars, starting with: {}",
                prompt.chars().count(),
                preview(&prompt, 200)
            );

            match self
                .pipeline
                .generate(
                    endpoints::PRD_GENERATION,
                    &prompt,
                    &GenerationSettings::with_max_tokens(PRD_MAX_TOKENS),
                )
                .await
            {
                Ok(output) => (output.text, output.provider),
                Err(e) => {
                    warn!("PRD generation failed, using mock PRD: {}", e);
                    (mock_prd(&input), MOCK_PROVIDER.to_string())
                }
            }
        } else {
            info!("No AI provider configured, using mock PRD");
            (mock_prd(&input), MOCK_PROVIDER.to_string())
        };

        let now = Utc::now();
        let record = PrdRecord {
            id: generate_id("prd"),
            title: input.title.clone(),
            content,
            input,
            ai_provider: provider,
            created_at: now,
            updated_at: now,
        };

        Ok(self.prds.create(&record).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_prompt_substitutes_every_field() {
        let input = PrdInput {
            title: "할 일 앱".to_string(),
            objectives: "생산성".to_string(),
            features: vec!["추가".to_string(), " ".to_string(), "삭제".to_string()],
            target_audience: "학생".to_string(),
            constraints: None,
        };

        let prompt = PrdGenerator::build_prompt(
            "{title}|{objectives}|{features}|{targetAudience}|{constraints}|{title}",
            &input,
        );

        assert_eq!(prompt, "할 일 앱|생산성|추가, 삭제|학생|없음|할 일 앱");
    }
}
