//! Reset command implementation
//!
//! Clears the latest-vitals snapshot. History entries are append-only
//! and are never touched.

use super::{connect_service, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::config::load_config;
use crate::domain::UserId;
use clap::Args;

/// Arguments for the reset command
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// User whose snapshot to clear
    #[arg(long)]
    pub user: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ResetArgs {
    /// Execute the reset command
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

        if !self.yes {
            println!("This clears the current dashboard snapshot for {user_id}.");
            println!("History entries are kept. Continue? [y/N]");

            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer)?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                println!("Aborted.");
                return Ok(0);
            }
        }

        let service = match connect_service(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to store");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        match service.delete_latest(&user_id).await {
            Ok(()) => {
                println!("✅ Latest vitals cleared for {user_id}");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to clear latest vitals");
                println!("   Error: {e}");
                Ok(EXIT_CONNECTION)
            }
        }
    }
}
