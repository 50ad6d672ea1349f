//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vitalis.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing vitalis configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(super::EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set store.backend to 'cosmosdb' for real persistence");
                println!("  3. Put credentials in a .env file:");
                println!("     - VITALIS_COSMOSDB_KEY (if using Cosmos DB)");
                println!("     - VITALIS_AI_API_KEY (for import and insights)");
                println!("     - VITALIS_IDENTITY_API_KEY (for account commands)");
                println!("  4. Validate configuration: vitalis validate-config");
                println!("  5. Record your first measurement: vitalis record --user <id> --heart-rate 72");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(super::EXIT_FATAL)
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        r#"# Vitalis configuration file
# Personal vitals tracking

[application]
name = "vitalis"
log_level = "info"

[store]
# memory keeps everything in-process (dev only); cosmosdb persists.
backend = "memory"  # memory | cosmosdb

# Required when store.backend = "cosmosdb"
# [cosmosdb]
# endpoint = "https://your-account.documents.azure.com:443/"
# key = "${VITALIS_COSMOSDB_KEY}"
# database_name = "vitalis"
# latest_container = "latest_vitals"
# history_container = "vitals_history"

# Required for the account commands
# [identity]
# api_key = "${VITALIS_IDENTITY_API_KEY}"

# Required for import and insights
# [ai]
# api_key = "${VITALIS_AI_API_KEY}"
# model = "gemini-1.5-flash"
# timeout_seconds = 60

[device]
heart_rate_buffer = 32

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
