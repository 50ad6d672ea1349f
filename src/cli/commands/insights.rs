//! Insights command implementation

use super::{connect_service, EXIT_CONFIG, EXIT_CONNECTION, EXIT_VALIDATION};
use crate::adapters::ai::GeminiClient;
use crate::config::load_config;
use crate::core::insights;
use crate::domain::{UserId, VitalError};
use clap::Args;

/// Arguments for the insights command
#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// User whose readings to summarize
    #[arg(long)]
    pub user: String,

    /// How many recent entries to include
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

impl InsightsArgs {
    /// Execute the insights command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let ai_config = match config.ai_required() {
            Ok(c) => c.clone(),
            Err(e) => {
                println!("❌ {e}");
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

        let history = service.history(&user_id, Some(self.limit)).await;

        let model = match GeminiClient::new(ai_config) {
            Ok(client) => client,
            Err(e) => {
                println!("❌ Failed to set up AI client");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        match insights::narrative(&model, &history).await {
            Ok(text) => {
                println!("💡 {text}");
                Ok(0)
            }
            Err(VitalError::Validation(message)) => {
                println!("ℹ️  {message}");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to generate insights");
                println!("   Error: {e}");
                Ok(EXIT_CONNECTION)
            }
        }
    }
}
