// ABOUTME: Unit tests for the server binary's library
// ABOUTME: Config parsing, health output, and full router assembly

mod health_tests;

use std::env;

pub(crate) const CONFIG_VARS: [&str; 9] = [
    "PORT",
    "CORS_ORIGIN",
    "PRDFORGE_DATABASE_PATH",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "GITHUB_TOKEN",
    "FIGMA_ACCESS_TOKEN",
];

pub(crate) fn clear_config_env() {
    for name in CONFIG_VARS {
        env::remove_var(name);
    }
}
