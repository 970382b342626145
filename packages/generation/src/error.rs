// ABOUTME: Error types for the generation package
// ABOUTME: Wraps storage, provider, prompt, and integration failures behind one enum

use prdforge_ai::AIServiceError;
use prdforge_integrations::IntegrationError;
use prdforge_prompts::PromptError;
use prdforge_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("AI service error: {0}")]
    AIService(#[from] AIServiceError),

    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("No AI provider configured")]
    NoProviderConfigured,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
