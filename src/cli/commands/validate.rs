//! Validate config command implementation

use crate::adapters::store::{create_store, VitalsStore};
use crate::config::{load_config, StoreBackend};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also connect to the configured store and verify it responds
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config already runs validation; reaching Ok means both passed.
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(super::EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);

        match config.store.backend {
            StoreBackend::CosmosDb => {
                if let Some(ref cosmos) = config.cosmosdb {
                    println!("  Store Backend: Cosmos DB");
                    println!("  Endpoint: {}", cosmos.endpoint);
                    println!("  Database: {}", cosmos.database_name);
                    println!(
                        "  Containers: {} / {}",
                        cosmos.latest_container, cosmos.history_container
                    );
                }
            }
            StoreBackend::Memory => {
                println!("  Store Backend: in-memory (dev only, nothing is persisted)");
            }
        }

        println!(
            "  Identity Provider: {}",
            if config.identity.is_some() {
                "configured"
            } else {
                "not configured"
            }
        );
        match config.ai {
            Some(ref ai) => println!("  AI Endpoint: {} ({})", ai.base_url, ai.model),
            None => println!("  AI Endpoint: not configured"),
        }

        if self.check_connection {
            println!();
            println!("🔌 Testing store connection...");
            let store = match create_store(&config) {
                Ok(s) => s,
                Err(e) => {
                    println!("❌ Failed to create store backend");
                    println!("   Error: {e}");
                    return Ok(super::EXIT_CONNECTION);
                }
            };
            match store.test_connection().await {
                Ok(()) => println!("✅ Store connection OK"),
                Err(e) => {
                    println!("❌ Store connection failed");
                    println!("   Error: {e}");
                    return Ok(super::EXIT_CONNECTION);
                }
            }
        }

        Ok(0)
    }
}
