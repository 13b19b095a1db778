//! Main Entrypoint for the Interview Coach
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and command line.
//! 2. Initializing logging on stderr so stdout stays free for the screen.
//! 3. Building the evaluation service client and session controller.
//! 4. Running the interactive session until the user quits.

use anyhow::Context;
use clap::Parser;
use coach_core::{EvaluationService, HttpEvaluationClient, SessionController};
use coach_service::{app::TerminalApp, cli::Cli, config::Config};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let config = Config::from_env()
        .context("Failed to load configuration")?
        .with_overrides(&cli)
        .context("Invalid command-line arguments")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(
        api_url = %config.api_url,
        role = %config.session.role,
        difficulty = %config.session.difficulty,
        "Configuration loaded. Starting session..."
    );

    // --- 3. Initialize the Session ---
    let service: Arc<dyn EvaluationService> = Arc::new(HttpEvaluationClient::new(&config.api_url));
    let controller = SessionController::new(service, config.session);

    // --- 4. Run the Interactive Loop ---
    let stdin = BufReader::new(tokio::io::stdin());
    TerminalApp::new(&controller, stdin, std::io::stdout())
        .run()
        .await?;

    info!("Session ended.");
    Ok(())
}
