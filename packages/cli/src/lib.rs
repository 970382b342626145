// ABOUTME: PRDForge server assembly: configuration, providers, storage, and routing
// ABOUTME: The binary calls run_server after loading config and tracing

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use prdforge_ai::{GeminiClient, GenerationPipeline, OpenAIClient, TextGenerator};
use prdforge_api::AppState;
use prdforge_integrations::{FigmaClient, GitHubClient};
use prdforge_storage::init_pool;
use tracing::{info, warn};

pub mod api;
pub mod config;

#[cfg(test)]
mod tests;

use config::Config;

/// Provider chain from configured keys: Gemini first, then OpenAI
pub fn build_pipeline(config: &Config) -> anyhow::Result<GenerationPipeline> {
    let mut providers: Vec<Arc<dyn TextGenerator>> = Vec::new();

    if let Some(key) = &config.gemini_api_key {
        let client = GeminiClient::new(key.clone(), config.gemini_model.clone())
            .context("Failed to create Gemini client")?;
        providers.push(Arc::new(client));
    }
    if let Some(key) = &config.openai_api_key {
        let client = OpenAIClient::new(key.clone(), config.openai_model.clone())
            .context("Failed to create OpenAI client")?;
        providers.push(Arc::new(client));
    }

    if providers.is_empty() {
        warn!("No AI provider configured, PRD and PR analysis will use mock output");
    }

    Ok(GenerationPipeline::new(providers))
}

/// Open the database, seed prompt templates, and wire every service
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let pool = init_pool(&config.database_path)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_path.display()))?;

    let github = GitHubClient::new(config.github_token.clone())
        .context("Failed to create GitHub client")?;
    let figma = match &config.figma_access_token {
        Some(token) => Some(
            FigmaClient::new(Some(token.clone())).context("Failed to create Figma client")?,
        ),
        None => None,
    };

    let state = AppState::new(pool, build_pipeline(config)?, github, figma);

    state
        .prompt_templates
        .seed_defaults()
        .await
        .context("Failed to seed prompt templates")?;

    Ok(state)
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Starting PRDForge server (database: {}, providers: {:?}, github token: {}, figma token: {})",
        config.database_path.display(),
        config.provider_names(),
        config.github_token.is_some(),
        config.figma_access_token.is_some()
    );

    let state = build_state(&config).await?;
    let app = api::create_router(state, &config)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{} (CORS origin: {})", addr, config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
