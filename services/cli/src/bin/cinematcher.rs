//! services/cli/src/bin/cinematcher.rs

use std::process::ExitCode;
use std::sync::Arc;

use cinematcher_core::Session;
use cinematcher_lib::{
    adapters::{FileStore, GeminiMatchAdapter},
    cli::{handle_command, Cli},
    config::Config,
    error::AppError,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    // --- 2. Initialize Service Adapters ---
    let api_key = if cli.command.needs_service() {
        config.require_api_key()?.to_string()
    } else {
        config.gemini_api_key.clone().unwrap_or_default()
    };
    let client = GeminiMatchAdapter::client_for(&config.gemini_api_base, &api_key);
    let recommender = Arc::new(GeminiMatchAdapter::new(client, config.match_model.clone()));
    let store = Arc::new(FileStore::new(config.data_dir.clone()));

    // --- 3. Run the Command in a Fresh Session ---
    let mut session = Session::start(recommender, store);
    let mut stdout = std::io::stdout().lock();
    let outcome = handle_command(cli.command, &mut session, &mut stdout).await;
    if let Err(e) = &outcome {
        error!(error = %e, "Command failed");
    }
    outcome
}
