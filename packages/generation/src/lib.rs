// ABOUTME: PRDForge generation library for PRDs, PR analyses, and test cases
// ABOUTME: Builds prompts, drives the provider chain, applies fallbacks, and renders exports

pub mod chat;
pub mod error;
pub mod export_service;
pub mod mock;
pub mod pr_analyzer;
pub mod prd_generator;
pub mod prompt_tester;
pub mod prompts;
pub mod test_case_generator;
pub mod test_case_parser;

pub use chat::{ChatReply, PrdChat};
pub use error::{GenerationError, Result};
pub use export_service::ExportResult;
pub use pr_analyzer::PrAnalyzer;
pub use prd_generator::PrdGenerator;
pub use prompt_tester::{PromptTestResult, PromptTester};
pub use prompts::PromptResolver;
pub use test_case_generator::{GeneratedTestCases, TestCaseGenerator, TestCaseRequest};
pub use test_case_parser::{parse_test_case_blocks, parse_test_cases};
