// Vitalis - Personal Vitals Tracking
// Copyright (c) 2025 Vitalis Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use vitalis::cli::{Cli, Commands};
use vitalis::config::LoggingConfig;
use vitalis::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI; file logging is opt-in through the
    // configuration the individual commands load.
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "vitalis starting");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Dashboard(args) => args.execute(&cli.config).await,
        Commands::Record(args) => args.execute(&cli.config).await,
        Commands::History(args) => args.execute(&cli.config).await,
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Import(args) => args.execute(&cli.config).await,
        Commands::Insights(args) => args.execute(&cli.config).await,
        Commands::Reset(args) => args.execute(&cli.config).await,
        Commands::Account(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
    }
}
