//! History command implementation

use super::{connect_service, parse_cli_date, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::config::load_config;
use crate::domain::{UserId, VitalRecord};
use clap::Args;

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// User whose history to list
    #[arg(long)]
    pub user: String,

    /// Maximum number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Range start (RFC 3339 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: Option<String>,

    /// Range end (RFC 3339 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end: Option<String>,
}

impl HistoryArgs {
    /// Execute the history command
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

        let service = match connect_service(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to store");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        let entries = match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                let start = match parse_cli_date(start, false) {
                    Ok(t) => t,
                    Err(e) => {
                        println!("❌ {e}");
                        return Ok(EXIT_VALIDATION);
                    }
                };
                let end = match parse_cli_date(end, true) {
                    Ok(t) => t,
                    Err(e) => {
                        println!("❌ {e}");
                        return Ok(EXIT_VALIDATION);
                    }
                };
                service.history_in_range(&user_id, start, end).await
            }
            (None, None) => service.history(&user_id, self.limit).await,
            _ => {
                println!("❌ --start and --end must be given together");
                return Ok(EXIT_VALIDATION);
            }
        };

        if entries.is_empty() {
            println!("No history entries found.");
            println!("Run 'vitalis record' to add a measurement.");
            return Ok(0);
        }

        println!("📖 History for {user_id} ({} entries)", entries.len());
        println!();
        for entry in &entries {
            println!("{}", format_entry(entry));
        }

        Ok(0)
    }
}

fn format_entry(entry: &VitalRecord) -> String {
    let mut parts = Vec::new();

    if let (Some(s), Some(d)) = (entry.blood_pressure_systolic, entry.blood_pressure_diastolic) {
        parts.push(format!("BP {s}/{d}"));
    }
    if let Some(v) = entry.heart_rate {
        parts.push(format!("HR {v}"));
    }
    if let Some(v) = entry.pulse_rate {
        parts.push(format!("pulse {v}"));
    }
    if let Some(v) = entry.blood_sugar_fasting {
        parts.push(format!("sugar {v}"));
    }
    if let Some(v) = entry.temperature {
        parts.push(format!("temp {v:.1}"));
    }
    if let Some(v) = entry.oxygen_saturation {
        parts.push(format!("SpO2 {v}%"));
    }
    if let Some(v) = entry.respiration_rate {
        parts.push(format!("resp {v}"));
    }
    if let Some(v) = entry.weight {
        parts.push(format!("weight {v:.1}"));
    }

    let values = if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join("  ")
    };

    format!(
        "{}  [{}]  {}",
        entry.date.format("%Y-%m-%d %H:%M"),
        entry.source,
        values
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VitalSource;

    #[test]
    fn test_format_entry_lists_populated_fields() {
        let entry = VitalRecord::builder(UserId::new("u").unwrap())
            .source(VitalSource::Imported)
            .blood_pressure(120, 80)
            .weight(70.0)
            .build();
        let line = format_entry(&entry);
        assert!(line.contains("BP 120/80"));
        assert!(line.contains("weight 70.0"));
        assert!(line.contains("[imported]"));
        assert!(!line.contains("HR"));
    }
}
