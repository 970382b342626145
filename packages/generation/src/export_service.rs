// ABOUTME: Markdown export of saved PRDs, PR analyses, and test case sets
// ABOUTME: Produces download content with timestamped file names

use chrono::{DateTime, Datelike, Timelike, Utc};
use prdforge_core::types::{PrAnalysisRecord, PrdRecord, TestCase};
use serde::Serialize;
use tracing::info;

pub const MARKDOWN_MIME: &str = "text/markdown; charset=utf-8";

const DEFAULT_PRD_NAME: &str = "PRD";
const DEFAULT_TEST_CASE_TITLE: &str = "테스트 케이스";

/// Export result with content and metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub content: String,
    pub file_name: String,
    pub mime_type: String,
}

impl ExportResult {
    fn markdown(content: String, file_name: String) -> Self {
        Self {
            content,
            file_name,
            mime_type: MARKDOWN_MIME.to_string(),
        }
    }
}

/// `2025. 1. 15.`
pub fn korean_date(at: &DateTime<Utc>) -> String {
    format!("{}. {}. {}.", at.year(), at.month(), at.day())
}

/// `2025. 1. 15. 오후 3:04:05`
pub fn korean_datetime(at: &DateTime<Utc>) -> String {
    let (period, hour) = match at.hour() {
        0 => ("오전", 12),
        h @ 1..=11 => ("오전", h),
        12 => ("오후", 12),
        h => ("오후", h - 12),
    };
    format!(
        "{} {} {}:{:02}:{:02}",
        korean_date(at),
        period,
        hour,
        at.minute(),
        at.second()
    )
}

/// Keep file names free of path separators
fn file_stem(title: &str, fallback: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    trimmed
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

pub fn export_prd(prd: &PrdRecord, millis: i64) -> ExportResult {
    info!("Exporting PRD {} as markdown", prd.id);
    ExportResult::markdown(
        prd.content.clone(),
        format!("{}-{}.md", file_stem(&prd.title, DEFAULT_PRD_NAME), millis),
    )
}

pub fn export_pr_analysis(record: &PrAnalysisRecord, millis: i64) -> ExportResult {
    info!("Exporting PR analysis {} as markdown", record.id);
    let pr = &record.pr_data;

    let content = format!(
        "# GitHub PR 분석 결과\n\n\
## PR 정보\n\
- **제목**: {title}\n\
- **URL**: {url}\n\
- **작성자**: {author}\n\
- **상태**: {state}\n\
- **브랜치**: {base} ← {head}\n\n\
## 분석 내용\n\n\
{analysis}\n\n\
---\n\
*분석 일시: {analyzed_at}*\n",
        title = pr.title,
        url = record.url,
        author = pr.author,
        state = pr.state,
        base = pr.base,
        head = pr.head,
        analysis = record.analysis,
        analyzed_at = korean_datetime(&record.analyzed_at),
    );

    ExportResult::markdown(content, format!("pr-analysis-{}.md", millis))
}

/// Four-column table: case title, step action, Korean type label, expected result
pub fn export_test_cases(
    title: Option<&str>,
    cases: &[TestCase],
    generated_at: &DateTime<Utc>,
    millis: i64,
) -> ExportResult {
    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TEST_CASE_TITLE);
    info!("Exporting {} test cases as markdown", cases.len());

    let mut content = String::from("# 테스트 케이스 문서\n\n");
    content.push_str(&format!("**생성일:** {}\n", korean_date(generated_at)));
    content.push_str(&format!("**제목:** {}\n\n", title));
    content.push_str("| 테스트 Depth1 | 테스트 Depth2 | 테스트 Depth3 | 기대결과 |\n");
    content.push_str("|--------------|--------------|--------------|----------|\n");

    for case in cases {
        let label = case.test_type.korean_label();

        if case.steps.is_empty() {
            content.push_str(&format!(
                "| {} | {} | - | {} |\n",
                case.title, label, case.expected_result
            ));
            continue;
        }

        for (index, step) in case.steps.iter().enumerate() {
            if index == 0 {
                content.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    case.title, step.action, label, step.expected_result
                ));
            } else {
                content.push_str(&format!(
                    "| | {} | | {} |\n",
                    step.action, step.expected_result
                ));
            }
        }
        content.push_str(&format!(
            "| | **최종 결과** | | **{}** |\n",
            case.expected_result
        ));
    }

    ExportResult::markdown(content, format!("test-cases-{}.md", millis))
}
