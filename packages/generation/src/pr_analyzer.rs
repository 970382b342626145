// ABOUTME: Pull request analysis combining GitHub metadata with an AI review
// ABOUTME: Records GitHub usage and falls back to a stats-based mock analysis

use std::sync::Arc;

use chrono::Utc;
use prdforge_ai::usage_logs::{endpoints, services};
use prdforge_ai::{GenerationPipeline, GenerationSettings, UsageStorage};
use prdforge_core::types::{PrAnalysisRecord, PullRequestData};
use prdforge_core::utils::generate_id;
use prdforge_integrations::GitHubClient;
use prdforge_prompts::{render_with_fields, PromptKind};
use prdforge_storage::PrAnalysisStorage;
use tracing::{info, warn};

use crate::error::Result;
use crate::mock::{mock_pr_analysis, MOCK_PROVIDER};
use crate::prompts::{PromptResolver, PR_ANALYSIS_FIELDS};

pub const PR_ANALYSIS_MAX_TOKENS: u32 = 3000;

const NO_DESCRIPTION: &str = "설명 없음";

pub struct PrAnalyzer {
    github: GitHubClient,
    pipeline: GenerationPipeline,
    prompts: PromptResolver,
    analyses: Arc<PrAnalysisStorage>,
    usage: Option<Arc<UsageStorage>>,
}

impl PrAnalyzer {
    pub fn new(
        github: GitHubClient,
        pipeline: GenerationPipeline,
        prompts: PromptResolver,
        analyses: Arc<PrAnalysisStorage>,
    ) -> Self {
        Self {
            github,
            pipeline,
            prompts,
            analyses,
            usage: None,
        }
    }

    pub fn with_usage_tracking(mut self, usage: Arc<UsageStorage>) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn build_prompt(template: &str, pr: &PullRequestData) -> String {
        let description = pr
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);
        let files_count = pr.files.len().to_string();
        let file_changes = pr
            .files
            .iter()
            .map(|f| format!("- {}: +{} -{} ({})", f.filename, f.additions, f.deletions, f.status))
            .collect::<Vec<_>>()
            .join("\n");
        let commits = pr
            .commits
            .iter()
            .map(|c| format!("- {}", c.message))
            .collect::<Vec<_>>()
            .join("\n");

        render_with_fields(
            template,
            &PR_ANALYSIS_FIELDS,
            &[
                ("title", pr.title.as_str()),
                ("description", description),
                ("filesCount", files_count.as_str()),
                ("fileChanges", file_changes.as_str()),
                ("commits", commits.as_str()),
            ],
        )
    }

    /// Fetch a pull request, analyze it, and save the result
    pub async fn analyze(&self, url: &str, custom_prompt: Option<&str>) -> Result<PrAnalysisRecord> {
        info!("Analyzing pull request {}", url);

        let fetched = self.github.fetch_pull_request(url).await;
        self.track_github(fetched.is_err()).await;
        let pr = fetched?;

        let (analysis, provider) = if self.pipeline.has_providers() {
            let template = self
                .prompts
                .resolve(PromptKind::GithubPrAnalysis, custom_prompt)
                .await?;
            let prompt = Self::build_prompt(&template, &pr);

            match self
                .pipeline
                .generate(
                    endpoints::PR_ANALYSIS,
                    &prompt,
                    &GenerationSettings::with_max_tokens(PR_ANALYSIS_MAX_TOKENS),
                )
                .await
            {
                Ok(output) => (output.text, output.provider),
                Err(e) => {
                    warn!("PR analysis failed, using mock analysis: {}", e);
                    (mock_pr_analysis(&pr), MOCK_PROVIDER.to_string())
                }
            }
        } else {
            info!("No AI provider configured, using mock analysis");
            (mock_pr_analysis(&pr), MOCK_PROVIDER.to_string())
        };

        let record = PrAnalysisRecord {
            id: generate_id("pr"),
            url: url.to_string(),
            title: pr.title.clone(),
            pr_data: pr,
            analysis,
            ai_provider: provider,
            analyzed_at: Utc::now(),
        };

        Ok(self.analyses.create(&record).await?)
    }

    async fn track_github(&self, is_error: bool) {
        let Some(usage) = &self.usage else {
            return;
        };
        if let Err(e) = usage
            .track(services::GITHUB, endpoints::PR_ANALYSIS, 0, is_error, 0.0)
            .await
        {
            warn!("Failed to record GitHub usage: {}", e);
        }
    }
}
