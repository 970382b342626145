// ABOUTME: External design and code-review sources feeding the generators
// ABOUTME: GitHub pull request metadata and Figma file summaries over REST

pub mod error;
pub mod figma;
pub mod github;

pub use error::{IntegrationError, Result};
pub use figma::{
    extract_figma_file_key, format_figma_info_for_prompt, parse_figma_design, FigmaClient,
    FigmaDesignInfo, FigmaElement, FigmaFile, FigmaNode, FigmaScreen,
};
pub use github::{parse_pr_url, GitHubClient, PullRequestRef};
