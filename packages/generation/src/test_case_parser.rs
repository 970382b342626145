// ABOUTME: Parses free-form AI output into structured test cases
// ABOUTME: Splits on case headers and `---`, reads labeled fields, and drops incomplete blocks

use lazy_static::lazy_static;
use prdforge_core::types::{TestCase, TestCaseType, TestStep};
use prdforge_core::utils::generate_id;
use regex::Regex;

use crate::mock::example_test_cases;

const TITLE: &str = "제목:";
const TYPE: &str = "유형:";
const DESCRIPTION: &str = "설명:";
const STEPS: &str = "테스트 단계:";
const FINAL_RESULT: &str = "최종 예상 결과:";

lazy_static! {
    static ref BLOCK_DELIMITER: Regex =
        Regex::new(r"테스트 케이스 \d+:|---").expect("valid block delimiter regex");
    static ref LABELED_STEP: Regex =
        Regex::new(r"^\d+\.\s*\[동작\]:\s*(.*?)\s*\|\s*\[예상 결과\]:\s*(.*)")
            .expect("valid labeled step regex");
    static ref PLAIN_STEP: Regex =
        Regex::new(r"^\d+\.\s*(.*?)\s*\|\s*(.*)").expect("valid plain step regex");
}

/// Parse test cases, returning the example cases when nothing valid is found
pub fn parse_test_cases(text: &str) -> Vec<TestCase> {
    let cases = parse_test_case_blocks(text);
    if cases.is_empty() {
        example_test_cases()
    } else {
        cases
    }
}

/// Parse test cases without the example fallback. Blocks lacking a title or steps are dropped.
pub fn parse_test_case_blocks(text: &str) -> Vec<TestCase> {
    BLOCK_DELIMITER
        .split(text)
        .filter(|block| !block.trim().is_empty() && block.contains(TITLE))
        .filter_map(parse_block)
        .collect()
}

fn field_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

fn parse_block(block: &str) -> Option<TestCase> {
    let mut title = String::new();
    let mut test_type = TestCaseType::default();
    let mut description = String::new();
    let mut expected_result = String::new();
    let mut step_lines: Vec<&str> = Vec::new();
    let mut in_steps = false;

    for line in block.trim().lines().map(str::trim) {
        if let Some(value) = field_value(line, TITLE) {
            title = value.to_string();
        } else if let Some(value) = field_value(line, TYPE) {
            // Unknown types keep the functional default
            if let Ok(parsed) = value.parse::<TestCaseType>() {
                test_type = parsed;
            }
        } else if let Some(value) = field_value(line, DESCRIPTION) {
            description = value.to_string();
        } else if line.starts_with(STEPS) {
            in_steps = true;
        } else if let Some(value) = field_value(line, FINAL_RESULT) {
            expected_result = value.to_string();
            in_steps = false;
        } else if in_steps && !line.is_empty() {
            step_lines.push(line);
        }
    }

    let steps: Vec<TestStep> = step_lines.into_iter().filter_map(parse_step).collect();

    if title.is_empty() || steps.is_empty() {
        return None;
    }

    Some(TestCase {
        id: generate_id("tc"),
        title,
        test_type,
        description,
        steps,
        expected_result,
    })
}

fn parse_step(line: &str) -> Option<TestStep> {
    let caps = LABELED_STEP
        .captures(line)
        .or_else(|| PLAIN_STEP.captures(line))?;

    Some(TestStep {
        action: caps[1].trim().to_string(),
        expected_result: caps[2].trim().to_string(),
    })
}
