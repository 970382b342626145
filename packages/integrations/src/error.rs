// ABOUTME: Error type for GitHub and Figma calls
// ABOUTME: Distinguishes bad input, missing credentials, and upstream API failures

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Invalid GitHub PR URL: {0}")]
    InvalidPrUrl(String),

    #[error("Pull request not found or not accessible: {0}")]
    PrNotFound(String),

    #[error("GitHub token is invalid")]
    Unauthorized,

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("Invalid Figma URL: {0}")]
    InvalidFigmaUrl(String),

    #[error("Figma access token is not configured")]
    MissingFigmaToken,

    #[error("Figma API error: {status} - {message}")]
    Figma { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, IntegrationError>;
