// ABOUTME: Test case generation from PRD, PR analysis, and Figma context
// ABOUTME: Assembles labeled context sections, calls the provider chain, and parses the reply

use std::sync::Arc;

use prdforge_ai::usage_logs::endpoints;
use prdforge_ai::{GenerationPipeline, GenerationSettings};
use prdforge_core::types::{TestCase, TestCaseType};
use prdforge_prompts::{render_with_fields, PromptKind};
use prdforge_storage::{PrAnalysisStorage, PrdStorage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GenerationError, Result};
use crate::mock::example_test_cases;
use crate::prompts::{PromptResolver, TEST_CASE_FIELDS};
use crate::test_case_parser::parse_test_case_blocks;

pub const TEST_CASE_MAX_TOKENS: u32 = 3000;

/// Context used when no PRD, analysis, or design is supplied
pub const GENERIC_CONTEXT: &str = "일반적인 웹 애플리케이션 기능";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRequest {
    #[serde(default)]
    pub prd_content: Option<String>,
    #[serde(default)]
    pub prd_id: Option<String>,
    #[serde(default)]
    pub pr_analysis_content: Option<String>,
    #[serde(default)]
    pub pr_analysis_id: Option<String>,
    /// Formatted output of the Figma import
    #[serde(default)]
    pub figma_info: Option<String>,
    #[serde(default)]
    pub test_types: Option<Vec<String>>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTestCases {
    pub test_cases: Vec<TestCase>,
    pub raw_text: String,
    pub test_types: Vec<String>,
    pub ai_provider: String,
    /// True when the reply could not be parsed and example cases were returned
    pub used_examples: bool,
}

/// Labeled context sections for whichever inputs are present
pub fn build_context(prd: Option<&str>, pr_analysis: Option<&str>, figma: Option<&str>) -> String {
    let sections = [
        ("=== PRD 내용 ===", prd),
        ("=== PR 분석 내용 ===", pr_analysis),
        ("=== Figma 디자인 정보 ===", figma),
    ];

    let mut context = String::new();
    for (header, body) in sections {
        if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
            context.push_str(header);
            context.push('\n');
            context.push_str(body);
            context.push_str("\n\n");
        }
    }

    if context.is_empty() {
        GENERIC_CONTEXT.to_string()
    } else {
        context
    }
}

/// Normalize requested types, defaulting to functional
pub fn normalize_test_types(requested: Option<&[String]>) -> Result<Vec<String>> {
    let requested: Vec<&String> = requested
        .unwrap_or_default()
        .iter()
        .filter(|t| !t.trim().is_empty())
        .collect();

    if requested.is_empty() {
        return Ok(vec![TestCaseType::Functional.as_str().to_string()]);
    }

    requested
        .into_iter()
        .map(|t| {
            t.parse::<TestCaseType>()
                .map(|parsed| parsed.as_str().to_string())
                .map_err(|_| {
                    GenerationError::InvalidInput(format!("지원하지 않는 테스트 유형입니다: {}", t))
                })
        })
        .collect()
}

pub struct TestCaseGenerator {
    pipeline: GenerationPipeline,
    prompts: PromptResolver,
    prds: Arc<PrdStorage>,
    analyses: Arc<PrAnalysisStorage>,
}

impl TestCaseGenerator {
    pub fn new(
        pipeline: GenerationPipeline,
        prompts: PromptResolver,
        prds: Arc<PrdStorage>,
        analyses: Arc<PrAnalysisStorage>,
    ) -> Self {
        Self {
            pipeline,
            prompts,
            prds,
            analyses,
        }
    }

    /// Inline content wins over a saved record reference
    async fn resolve_sources(&self, request: &TestCaseRequest) -> Result<(Option<String>, Option<String>)> {
        let prd = match (non_blank(&request.prd_content), non_blank(&request.prd_id)) {
            (Some(content), _) => Some(content.to_string()),
            (None, Some(id)) => Some(self.prds.get(id).await?.content),
            (None, None) => None,
        };

        let analysis = match (
            non_blank(&request.pr_analysis_content),
            non_blank(&request.pr_analysis_id),
        ) {
            (Some(content), _) => Some(content.to_string()),
            (None, Some(id)) => Some(self.analyses.get(id).await?.analysis),
            (None, None) => None,
        };

        Ok((prd, analysis))
    }

    pub async fn generate(&self, request: TestCaseRequest) -> Result<GeneratedTestCases> {
        let test_types = normalize_test_types(request.test_types.as_deref())?;
        let (prd, analysis) = self.resolve_sources(&request).await?;

        info!(
            "Generating test cases (prd: {}, pr analysis: {}, figma: {}, types: {})",
            prd.is_some(),
            analysis.is_some(),
            non_blank(&request.figma_info).is_some(),
            test_types.join(", ")
        );

        if !self.pipeline.has_providers() {
            return Err(GenerationError::NoProviderConfigured);
        }

        let context = build_context(
            prd.as_deref(),
            analysis.as_deref(),
            non_blank(&request.figma_info),
        );
        let template = self
            .prompts
            .resolve(PromptKind::TestCaseGeneration, request.custom_prompt.as_deref())
            .await?;
        let types_text = test_types.join(", ");
        let prompt = render_with_fields(
            &template,
            &TEST_CASE_FIELDS,
            &[("context", context.as_str()), ("testTypes", types_text.as_str())],
        );

        let output = self
            .pipeline
            .generate(
                endpoints::TEST_CASES,
                &prompt,
                &GenerationSettings::with_max_tokens(TEST_CASE_MAX_TOKENS),
            )
            .await?;

        let parsed = parse_test_case_blocks(&output.text);
        let used_examples = parsed.is_empty();
        let test_cases = if used_examples {
            warn!("No test cases could be parsed from the reply, returning examples");
            example_test_cases()
        } else {
            parsed
        };

        info!("Generated {} test cases with {}", test_cases.len(), output.provider);

        Ok(GeneratedTestCases {
            test_cases,
            raw_text: output.text,
            test_types,
            ai_provider: output.provider,
            used_examples,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
