// ABOUTME: Prompt template management for PRDForge
// ABOUTME: Embedded default templates, template kinds, and placeholder substitution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod render;
mod template;

pub use render::{placeholders, render, render_with_fields, substitute_test_input};
pub use template::{PromptTemplate, PromptVersion};

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Unknown prompt type: {0}")]
    UnknownKind(String),

    #[error("Failed to parse prompt JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid prompt format: {0}")]
    InvalidFormat(String),
}

/// The four prompt template kinds managed by the admin screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    PrdGeneration,
    TestCaseGeneration,
    ChatRefinement,
    GithubPrAnalysis,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::PrdGeneration,
        PromptKind::TestCaseGeneration,
        PromptKind::ChatRefinement,
        PromptKind::GithubPrAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::PrdGeneration => "prd_generation",
            PromptKind::TestCaseGeneration => "test_case_generation",
            PromptKind::ChatRefinement => "chat_refinement",
            PromptKind::GithubPrAnalysis => "github_pr_analysis",
        }
    }

    fn embedded_json(&self) -> &'static str {
        match self {
            PromptKind::PrdGeneration => include_str!("../templates/prd_generation.json"),
            PromptKind::TestCaseGeneration => {
                include_str!("../templates/test_case_generation.json")
            }
            PromptKind::ChatRefinement => include_str!("../templates/chat_refinement.json"),
            PromptKind::GithubPrAnalysis => include_str!("../templates/github_pr_analysis.json"),
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptKind {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PromptError::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub version: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    pub description: String,
}

/// On-disk prompt file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub category: String,
    pub template: String,
    pub parameters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PromptMetadata>,
}

impl Prompt {
    pub fn description(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.description.as_str())
            .unwrap_or_default()
    }
}

/// Load the built-in template for a kind
pub fn default_prompt(kind: PromptKind) -> Result<Prompt, PromptError> {
    let prompt: Prompt = serde_json::from_str(kind.embedded_json())?;

    if prompt.id.is_empty() || prompt.template.is_empty() || prompt.category != kind.as_str() {
        return Err(PromptError::InvalidFormat(format!(
            "Invalid built-in prompt for {}",
            kind
        )));
    }

    Ok(prompt)
}

/// Built-in templates for every kind, in display order
pub fn default_prompts() -> Result<Vec<Prompt>, PromptError> {
    PromptKind::ALL.into_iter().map(default_prompt).collect()
}
