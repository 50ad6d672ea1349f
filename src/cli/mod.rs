//! CLI interface and argument parsing
//!
//! The command-line front end for vitalis using clap. Commands are thin:
//! they parse arguments, wire up the configured adapters and print what
//! the core returns.

pub mod commands;

use clap::{Parser, Subcommand};

/// Vitalis - personal vitals tracking
#[derive(Parser, Debug)]
#[command(name = "vitalis")]
#[command(version, about, long_about = None)]
#[command(author = "Vitalis Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vitalis.toml", env = "VITALIS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VITALIS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the vitals dashboard
    Dashboard(commands::dashboard::DashboardArgs),

    /// Record a measurement manually
    Record(commands::record::RecordArgs),

    /// List recorded history
    History(commands::history::HistoryArgs),

    /// Export history as CSV or JSON
    Export(commands::export::ExportArgs),

    /// Import vitals from a document photo or PDF
    Import(commands::import::ImportArgs),

    /// Generate a narrative insight over recent readings
    Insights(commands::insights::InsightsArgs),

    /// Clear the latest-vitals snapshot
    Reset(commands::reset::ResetArgs),

    /// Account management against the identity provider
    Account(commands::account::AccountArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_dashboard() {
        let cli = Cli::parse_from(["vitalis", "dashboard", "--user", "user-1"]);
        assert_eq!(cli.config, "vitalis.toml");
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["vitalis", "--config", "custom.toml", "dashboard", "--user", "u"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_record_with_values() {
        let cli = Cli::parse_from([
            "vitalis", "record", "--user", "user-1", "--systolic", "150", "--diastolic", "95",
        ]);
        match cli.command {
            Commands::Record(args) => {
                assert_eq!(args.systolic, Some(150));
                assert_eq!(args.diastolic, Some(95));
            }
            _ => panic!("expected record command"),
        }
    }

    #[test]
    fn test_cli_parse_export_format() {
        let cli = Cli::parse_from([
            "vitalis", "export", "--user", "user-1", "--format", "json",
        ]);
        match cli.command {
            Commands::Export(args) => assert_eq!(args.format, commands::export::ExportFormat::Json),
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parse_account_subcommand() {
        let cli = Cli::parse_from([
            "vitalis", "account", "reset-password", "--email", "a@b.c",
        ]);
        assert!(matches!(cli.command, Commands::Account(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["vitalis", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["vitalis", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
