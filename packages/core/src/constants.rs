// ABOUTME: Filesystem constants and well-known locations for PRDForge
// ABOUTME: Resolves the data directory that holds the SQLite database

use std::env;
use std::path::PathBuf;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "prdforge.db";

/// Get the path to the PRDForge data directory (~/.prdforge)
pub fn data_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".prdforge")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".prdforge")
    }
}

/// Get the default database path (~/.prdforge/prdforge.db)
pub fn default_database_path() -> PathBuf {
    data_dir().join(DATABASE_FILE_NAME)
}
