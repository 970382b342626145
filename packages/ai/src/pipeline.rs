// ABOUTME: Ordered provider chain with per-provider retry and usage tracking
// ABOUTME: Tries each configured provider in turn and reports which one produced the text

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{AIServiceError, AIServiceResult};
use crate::retry::{with_retry, RetryPolicy};
use crate::service::{GenerationSettings, TextGenerator};
use crate::usage_logs::{estimate_cost, estimate_tokens, UsageStorage};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[derive(Clone)]
pub struct GenerationPipeline {
    providers: Vec<Arc<dyn TextGenerator>>,
    retry: RetryPolicy,
    usage: Option<Arc<UsageStorage>>,
}

impl GenerationPipeline {
    /// Providers are tried in the given order
    pub fn new(providers: Vec<Arc<dyn TextGenerator>>) -> Self {
        Self {
            providers,
            retry: RetryPolicy::default(),
            usage: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_usage_tracking(mut self, usage: Arc<UsageStorage>) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.provider()).collect()
    }

    /// Generate text with the first provider that succeeds.
    ///
    /// Each provider gets the full retry budget for overload errors before the
    /// next one is tried. When every provider fails the last error is returned.
    pub async fn generate(
        &self,
        endpoint: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> AIServiceResult<PipelineOutput> {
        let mut last_error = AIServiceError::NoProviderConfigured;

        for provider in &self.providers {
            let label = format!("{} ({})", provider.provider(), provider.model());
            let result =
                with_retry(&self.retry, &label, || provider.generate(prompt, settings)).await;

            match result {
                Ok(response) => {
                    let tokens = estimate_tokens(prompt) + estimate_tokens(&response.data);
                    self.record(provider.provider(), endpoint, tokens, false).await;

                    info!(
                        "{} generated {} chars for {}",
                        label,
                        response.data.chars().count(),
                        endpoint
                    );
                    return Ok(PipelineOutput {
                        text: response.data,
                        provider: provider.provider().to_string(),
                        model: provider.model().to_string(),
                    });
                }
                Err(err) => {
                    error!("{} failed for {}: {}", label, endpoint, err);
                    self.record(provider.provider(), endpoint, 0, true).await;
                    last_error = err;
                }
            }
        }

        if self.providers.len() > 1 {
            warn!("All AI providers failed for {}", endpoint);
        }
        Err(last_error)
    }

    async fn record(&self, service: &str, endpoint: &str, tokens: u64, is_error: bool) {
        let Some(usage) = &self.usage else {
            return;
        };
        let cost = estimate_cost(service, tokens);
        if let Err(e) = usage.track(service, endpoint, tokens, is_error, cost).await {
            warn!("Failed to record API usage for {}: {}", service, e);
        }
    }
}
