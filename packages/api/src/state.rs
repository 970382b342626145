// ABOUTME: Shared application state handed to every handler
// ABOUTME: Builds storages and generation services once from a pool, a provider chain, and integration clients

use std::sync::Arc;

use prdforge_ai::{GenerationPipeline, UsageStorage};
use prdforge_generation::{
    PrAnalyzer, PrdChat, PrdGenerator, PromptResolver, PromptTester, TestCaseGenerator,
};
use prdforge_integrations::{FigmaClient, GitHubClient};
use prdforge_storage::{PrAnalysisStorage, PrdStorage, PromptTemplateStorage, TestCaseSetStorage};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub prds: Arc<PrdStorage>,
    pub pr_analyses: Arc<PrAnalysisStorage>,
    pub test_case_sets: Arc<TestCaseSetStorage>,
    pub prompt_templates: Arc<PromptTemplateStorage>,
    pub usage: Arc<UsageStorage>,
    pub prompts: PromptResolver,
    pub prd_generator: Arc<PrdGenerator>,
    pub prd_chat: Arc<PrdChat>,
    pub pr_analyzer: Arc<PrAnalyzer>,
    pub test_case_generator: Arc<TestCaseGenerator>,
    pub prompt_tester: Arc<PromptTester>,
    /// `None` when no Figma access token is configured
    pub figma: Option<Arc<FigmaClient>>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        pipeline: GenerationPipeline,
        github: GitHubClient,
        figma: Option<FigmaClient>,
    ) -> Self {
        let prds = Arc::new(PrdStorage::new(pool.clone()));
        let pr_analyses = Arc::new(PrAnalysisStorage::new(pool.clone()));
        let test_case_sets = Arc::new(TestCaseSetStorage::new(pool.clone()));
        let prompt_templates = Arc::new(PromptTemplateStorage::new(pool.clone()));
        let usage = Arc::new(UsageStorage::new(pool));

        let pipeline = pipeline.with_usage_tracking(usage.clone());
        let prompts = PromptResolver::new(prompt_templates.clone());

        let prd_generator = PrdGenerator::new(pipeline.clone(), prompts.clone(), prds.clone());
        let prd_chat = PrdChat::new(pipeline.clone(), prompts.clone(), prds.clone());
        let pr_analyzer = PrAnalyzer::new(
            github,
            pipeline.clone(),
            prompts.clone(),
            pr_analyses.clone(),
        )
        .with_usage_tracking(usage.clone());
        let test_case_generator = TestCaseGenerator::new(
            pipeline.clone(),
            prompts.clone(),
            prds.clone(),
            pr_analyses.clone(),
        );
        let prompt_tester = PromptTester::new(pipeline);

        Self {
            prds,
            pr_analyses,
            test_case_sets,
            prompt_templates,
            usage,
            prompts,
            prd_generator: Arc::new(prd_generator),
            prd_chat: Arc::new(prd_chat),
            pr_analyzer: Arc::new(pr_analyzer),
            test_case_generator: Arc::new(test_case_generator),
            prompt_tester: Arc::new(prompt_tester),
            figma: figma.map(Arc::new),
        }
    }
}
