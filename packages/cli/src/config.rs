// ABOUTME: Server configuration read from environment variables
// ABOUTME: Placeholder credentials from the sample .env count as not configured

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use prdforge_ai::gemini::DEFAULT_GEMINI_MODEL;
use prdforge_ai::openai::DEFAULT_OPENAI_MODEL;
use prdforge_core::default_database_path;
use thiserror::Error;

/// Values shipped in `.env.example` that must not be sent to a provider
const PLACEHOLDER_VALUES: [&str; 4] = [
    "your-gemini-api-key",
    "your-openai-api-key",
    "your-github-token",
    "your-figma-access-token",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub github_token: Option<String>,
    pub figma_access_token: Option<String>,
}

/// A set, non-blank, non-placeholder value
fn credential(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !PLACEHOLDER_VALUES.contains(&v.as_str()))
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = var_or("PORT", "4001").trim().parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:3000");
        if !cors_origin.starts_with("http://") && !cors_origin.starts_with("https://") {
            return Err(ConfigError::InvalidCorsOrigin(cors_origin));
        }

        let database_path = env::var("PRDFORGE_DATABASE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Ok(Config {
            port,
            cors_origin,
            database_path,
            gemini_api_key: credential("GEMINI_API_KEY"),
            gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            openai_api_key: credential("OPENAI_API_KEY"),
            openai_model: var_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            github_token: credential("GITHUB_TOKEN"),
            figma_access_token: credential("FIGMA_ACCESS_TOKEN"),
        })
    }

    /// Configured AI providers in the order they are tried
    pub fn provider_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.gemini_api_key.is_some() {
            names.push("gemini");
        }
        if self.openai_api_key.is_some() {
            names.push("openai");
        }
        names
    }
}
