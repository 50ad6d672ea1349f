//! Account command implementation
//!
//! Thin wrappers over the identity adapter. Every known provider failure
//! surfaces its own fixed user-facing message.

use super::{EXIT_CONFIG, EXIT_CONNECTION};
use crate::adapters::auth::IdentityClient;
use crate::config::load_config;
use crate::domain::VitalError;
use clap::{Args, Subcommand};

/// Arguments for the account command
#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub action: AccountAction,
}

/// Account operations
#[derive(Subcommand, Debug)]
pub enum AccountAction {
    /// Create a new account
    Create {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: String,
    },

    /// Sign in and show the session's user id
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Send a password-reset email
    ResetPassword {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Sign in and show the account profile
    Profile {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
}

impl AccountArgs {
    /// Execute the account command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let identity_config = match config.identity_required() {
            Ok(c) => c.clone(),
            Err(e) => {
                println!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let client = match IdentityClient::new(identity_config) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to set up identity client");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        let outcome = match &self.action {
            AccountAction::Create {
                email,
                password,
                name,
            } => client
                .create_account(email, password, name)
                .await
                .map(|session| {
                    println!("✅ Account created");
                    println!("   User id: {}", session.user_id);
                    client.sign_out(session);
                }),
            AccountAction::Login { email, password } => {
                client.sign_in(email, password).await.map(|session| {
                    println!("✅ Signed in");
                    println!("   User id: {}", session.user_id);
                    println!("   Use this id with --user on the other commands.");
                    client.sign_out(session);
                })
            }
            AccountAction::ResetPassword { email } => {
                client.send_password_reset(email).await.map(|()| {
                    println!("✅ Password reset email sent to {email}");
                })
            }
            AccountAction::Profile { email, password } => {
                match client.sign_in(email, password).await {
                    Ok(session) => {
                        let result = client.get_profile(&session).await.map(|profile| {
                            println!("👤 Profile");
                            println!("   User id: {}", profile.user_id);
                            println!("   Email:   {}", profile.email);
                            if let Some(name) = &profile.display_name {
                                println!("   Name:    {name}");
                            }
                        });
                        client.sign_out(session);
                        result
                    }
                    Err(e) => Err(e),
                }
            }
        };

        match outcome {
            Ok(()) => Ok(0),
            Err(VitalError::Auth(auth_err)) => {
                println!("❌ {}", auth_err.user_message());
                Ok(EXIT_CONNECTION)
            }
            Err(e) => {
                println!("❌ Account operation failed");
                println!("   Error: {e}");
                Ok(EXIT_CONNECTION)
            }
        }
    }
}
