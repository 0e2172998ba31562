//! Bullet Train - application entry point
//!
//! CLI-based entry point that loads settings and dispatches to commands.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::settings::{generate_secret_key, LoggingSettings};
use common::{ProcessEnv, Settings};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load .env first so RUST_LOG from it applies
    ProcessEnv::load();

    // Initialize tracing before settings so their warnings are visible
    init_tracing(cli.verbose, &LoggingSettings::default());

    if let Commands::SecretKey = cli.command {
        println!("{}", generate_secret_key());
        return;
    }

    // Load configuration
    let settings = match Settings::from_env().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Settings { action } => commands::settings::execute(action, &settings),
        Commands::Migrate { action } => commands::migrate::execute(action, &settings).await,
        Commands::SecretKey => Ok(()),
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool, logging: &LoggingSettings) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| logging.env_filter_directive())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(logging.show_target))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
