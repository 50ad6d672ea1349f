//! Dashboard command implementation

use super::{connect_service, status_icon, EXIT_CONFIG, EXIT_CONNECTION};
use crate::config::load_config;
use crate::domain::UserId;
use clap::Args;

/// Arguments for the dashboard command
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// User whose vitals to show
    #[arg(long)]
    pub user: String,
}

impl DashboardArgs {
    /// Execute the dashboard command
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
                return Ok(super::EXIT_VALIDATION);
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

        let cards = match service.dashboard(&user_id).await {
            Ok(cards) => cards,
            Err(e) => {
                println!("❌ Failed to fetch vitals");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        println!("📋 Vitals for {user_id}");
        println!();
        for card in &cards {
            println!(
                "{} {:<18} {:>8} {:<12} {}",
                status_icon(card.status),
                card.label,
                card.value,
                card.unit,
                card.recorded
            );
        }

        Ok(0)
    }
}
