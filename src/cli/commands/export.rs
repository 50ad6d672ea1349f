//! Export command implementation
//!
//! Renders history through the export formatters and writes the result to
//! a file or stdout. The file write is the only part that touches the
//! local filesystem.

use super::{connect_service, parse_cli_date, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::config::load_config;
use crate::domain::UserId;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Fixed nine-column CSV
    Csv,
    /// JSON wrapper with export metadata
    Json,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// User whose history to export
    #[arg(long)]
    pub user: String,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Range start (RFC 3339 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (RFC 3339 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end: Option<String>,
}

impl ExportArgs {
    fn parse_range(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, String> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                let start = parse_cli_date(start, false)?;
                let end = parse_cli_date(end, true)?;
                if start > end {
                    return Err("--start must not be after --end".to_string());
                }
                Ok(Some((start, end)))
            }
            (None, None) => Ok(None),
            _ => Err("--start and --end must be given together".to_string()),
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let user_id = match UserId::new(self.user.clone()) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let range = match self.parse_range() {
            Ok(r) => r,
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_VALIDATION);
            }
        };

        let service = match connect_service(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to store");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        let rendered = match self.format {
            ExportFormat::Csv => service.export_csv(&user_id, range).await,
            ExportFormat::Json => match service.export_json(&user_id, range).await {
                Ok(json) => json,
                Err(e) => {
                    println!("❌ Failed to render export");
                    println!("   Error: {e}");
                    return Ok(super::EXIT_FATAL);
                }
            },
        };

        match &self.output {
            Some(path) => {
                if let Err(e) = tokio::fs::write(path, &rendered).await {
                    println!("❌ Failed to write {}", path.display());
                    println!("   Error: {e}");
                    return Ok(super::EXIT_FATAL);
                }
                println!("✅ Exported to {}", path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(0)
    }
}
