// ABOUTME: Chooses the template body used for a generation request
// ABOUTME: Request override first, then the active stored template, then the built-in default

use std::sync::Arc;

use prdforge_prompts::{default_prompt, PromptKind};
use prdforge_storage::PromptTemplateStorage;
use tracing::debug;

use crate::error::Result;

/// Placeholders filled for each template kind
pub const PRD_FIELDS: [&str; 5] = [
    "title",
    "objectives",
    "features",
    "targetAudience",
    "constraints",
];
pub const PR_ANALYSIS_FIELDS: [&str; 5] =
    ["title", "description", "filesCount", "fileChanges", "commits"];
pub const TEST_CASE_FIELDS: [&str; 2] = ["context", "testTypes"];
pub const CHAT_FIELDS: [&str; 2] = ["currentPrd", "message"];

#[derive(Clone)]
pub struct PromptResolver {
    templates: Arc<PromptTemplateStorage>,
}

impl PromptResolver {
    pub fn new(templates: Arc<PromptTemplateStorage>) -> Self {
        Self { templates }
    }

    pub async fn resolve(&self, kind: PromptKind, custom: Option<&str>) -> Result<String> {
        if let Some(custom) = custom.filter(|c| !c.trim().is_empty()) {
            debug!("Using request prompt override for {}", kind);
            return Ok(custom.to_string());
        }

        if let Some(active) = self.templates.active_for_kind(kind).await? {
            debug!("Using stored template {} v{} for {}", active.id, active.version, kind);
            return Ok(active.content);
        }

        Ok(default_prompt(kind)?.template)
    }
}
