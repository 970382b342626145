// ABOUTME: Domain model shared by generation, storage, and the HTTP layer
// ABOUTME: PRD inputs and records, pull request metadata, and structured test cases

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form input used to generate a PRD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub objectives: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub constraints: Option<String>,
}

impl PrdInput {
    /// Features with blank entries removed, in form order
    pub fn non_empty_features(&self) -> Vec<&str> {
        self.features
            .iter()
            .map(|f| f.as_str())
            .filter(|f| !f.trim().is_empty())
            .collect()
    }

    /// Constraints text, or `None` when the field was left blank
    pub fn constraints_text(&self) -> Option<&str> {
        self.constraints
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

/// A generated PRD saved to history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub input: PrdInput,
    pub ai_provider: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-file diff statistics of a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub filename: String,
    pub status: String,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
}

/// Pull request metadata extracted from GitHub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestData {
    pub url: String,
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub state: String,
    /// Target branch
    pub base: String,
    /// Source branch
    pub head: String,
    pub additions: u64,
    pub deletions: u64,
    /// One-line summary, e.g. `3 files changed, +10 -2`
    pub diff: String,
    pub commits: Vec<CommitSummary>,
    pub files: Vec<FileChange>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl PullRequestData {
    pub fn total_changed_lines(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// A PR analysis saved to history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrAnalysisRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub pr_data: PullRequestData,
    pub analysis: String,
    pub ai_provider: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseType {
    #[default]
    Functional,
    EdgeCase,
    Regression,
    Integration,
    Performance,
}

impl TestCaseType {
    pub const ALL: [TestCaseType; 5] = [
        TestCaseType::Functional,
        TestCaseType::EdgeCase,
        TestCaseType::Regression,
        TestCaseType::Integration,
        TestCaseType::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestCaseType::Functional => "functional",
            TestCaseType::EdgeCase => "edge_case",
            TestCaseType::Regression => "regression",
            TestCaseType::Integration => "integration",
            TestCaseType::Performance => "performance",
        }
    }

    /// Short Korean label used in exported tables
    pub fn korean_label(&self) -> &'static str {
        match self {
            TestCaseType::Functional => "기능",
            TestCaseType::EdgeCase => "엣지",
            TestCaseType::Regression => "회귀",
            TestCaseType::Integration => "통합",
            TestCaseType::Performance => "성능",
        }
    }
}

impl fmt::Display for TestCaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestCaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TestCaseType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("Unknown test case type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub action: String,
    pub expected_result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub test_type: TestCaseType,
    pub description: String,
    pub steps: Vec<TestStep>,
    pub expected_result: String,
}

/// A named batch of generated test cases saved to history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseSet {
    pub id: String,
    pub title: String,
    pub test_cases: Vec<TestCase>,
    pub prd_id: Option<String>,
    pub pr_analysis_id: Option<String>,
    pub test_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prd_input_deserializes_camel_case() {
        let input: PrdInput = serde_json::from_str(
            r#"{"title":"앱","objectives":"목표","features":["로그인",""],"targetAudience":"학생"}"#,
        )
        .unwrap();

        assert_eq!(input.target_audience, "학생");
        assert_eq!(input.non_empty_features(), vec!["로그인"]);
        assert_eq!(input.constraints_text(), None);
    }

    #[test]
    fn test_blank_constraints_are_treated_as_absent() {
        let input = PrdInput {
            constraints: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(input.constraints_text(), None);
    }

    #[test]
    fn test_test_case_type_parsing() {
        assert_eq!("edge_case".parse::<TestCaseType>(), Ok(TestCaseType::EdgeCase));
        assert_eq!(" Performance ".parse::<TestCaseType>(), Ok(TestCaseType::Performance));
        assert!("security".parse::<TestCaseType>().is_err());
    }

    #[test]
    fn test_test_case_serializes_type_field() {
        let case = TestCase {
            id: "tc_1".to_string(),
            title: "로그인".to_string(),
            test_type: TestCaseType::EdgeCase,
            description: String::new(),
            steps: vec![TestStep {
                action: "접속".to_string(),
                expected_result: "폼 표시".to_string(),
            }],
            expected_result: "성공".to_string(),
        };

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(value["type"], "edge_case");
        assert_eq!(value["steps"][0]["expectedResult"], "폼 표시");
        assert_eq!(value["expectedResult"], "성공");
    }
}
