// ABOUTME: Editable prompt template records with version history
// ABOUTME: Edits bump the version by one and snapshot the previous body

use crate::{Prompt, PromptKind};
use chrono::{DateTime, Utc};
use prdforge_core::generate_id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub content: String,
    pub description: String,
    pub is_active: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A prior body of a template, kept when the template is edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVersion {
    pub template_id: String,
    pub version: i64,
    pub content: String,
    pub change_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PromptTemplate {
    /// Active version-1 template seeded from a built-in prompt
    pub fn from_default(kind: PromptKind, prompt: &Prompt) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id("prompt"),
            name: prompt.name.clone(),
            kind,
            content: prompt.template.clone(),
            description: prompt.description().to_string(),
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inactive version-1 copy under a new id, used to draft an alternative
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id("prompt"),
            name: format!("{} (사본)", self.name),
            kind: self.kind,
            content: self.content.clone(),
            description: self.description.clone(),
            is_active: false,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the body and return the snapshot of the body it replaced
    pub fn apply_edit(&mut self, content: String, change_note: Option<String>) -> PromptVersion {
        let now = Utc::now();
        let previous = PromptVersion {
            template_id: self.id.clone(),
            version: self.version,
            content: std::mem::replace(&mut self.content, content),
            change_note: change_note.filter(|n| !n.trim().is_empty()),
            created_at: now,
        };
        self.version += 1;
        self.updated_at = now;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_prompt;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_edit_increments_version_by_one() {
        let prompt = default_prompt(PromptKind::PrdGeneration).unwrap();
        let mut template = PromptTemplate::from_default(PromptKind::PrdGeneration, &prompt);
        assert_eq!(template.version, 1);
        assert!(template.id.starts_with("prompt_"));

        let first = template.apply_edit("v2 {title}".to_string(), Some("짧게".to_string()));
        assert_eq!(first.version, 1);
        assert_eq!(first.content, prompt.template);
        assert_eq!(first.change_note.as_deref(), Some("짧게"));
        assert_eq!(template.version, 2);

        let second = template.apply_edit("v3 {title}".to_string(), Some("  ".to_string()));
        assert_eq!(second.version, 2);
        assert_eq!(second.content, "v2 {title}");
        assert_eq!(second.change_note, None);
        assert_eq!(template.version, 3);
        assert_eq!(template.content, "v3 {title}");
    }

    #[test]
    fn test_duplicate_is_inactive_first_version() {
        let prompt = default_prompt(PromptKind::ChatRefinement).unwrap();
        let mut template = PromptTemplate::from_default(PromptKind::ChatRefinement, &prompt);
        template.apply_edit("{currentPrd}\n{message}".to_string(), None);

        let copy = template.duplicate();
        assert_ne!(copy.id, template.id);
        assert_eq!(copy.name, format!("{} (사본)", template.name));
        assert_eq!(copy.kind, PromptKind::ChatRefinement);
        assert_eq!(copy.content, "{currentPrd}\n{message}");
        assert_eq!(copy.version, 1);
        assert!(!copy.is_active);
    }

    #[test]
    fn test_template_serializes_kind_as_type() {
        let prompt = default_prompt(PromptKind::GithubPrAnalysis).unwrap();
        let template = PromptTemplate::from_default(PromptKind::GithubPrAnalysis, &prompt);
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["type"], "github_pr_analysis");
        assert_eq!(value["isActive"], true);
    }
}
