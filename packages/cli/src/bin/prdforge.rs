// ABOUTME: Command-line entry point for the PRDForge server
// ABOUTME: Loads .env, installs tracing, applies flag overrides, and serves the API

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prdforge_cli::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prdforge")]
#[command(about = "PRDForge - PRD, PR analysis, and test case generation server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file (overrides PRDFORGE_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        database: None,
    }) {
        Commands::Serve { port, database } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }
            prdforge_cli::run_server(config).await
        }
    }
}
