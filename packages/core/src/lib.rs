// ABOUTME: Core types, constants, and utilities for PRDForge
// ABOUTME: Foundational package providing the shared domain model across all PRDForge packages

pub mod constants;
pub mod types;
pub mod utils;

// Re-export main types
pub use types::{
    CommitSummary, FileChange, PrAnalysisRecord, PrdInput, PrdRecord, PullRequestData, TestCase,
    TestCaseSet, TestCaseType, TestStep,
};

// Re-export constants
pub use constants::{data_dir, default_database_path, DATABASE_FILE_NAME};

// Re-export utilities
pub use utils::{generate_id, now_millis, preview};
