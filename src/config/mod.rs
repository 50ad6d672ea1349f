//! Configuration management
//!
//! TOML-backed configuration with `${ENV_VAR}` substitution, `VITALIS_*`
//! environment overrides and per-section validation.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    AiConfig, ApplicationConfig, CosmosDbConfig, DeviceConfig, IdentityConfig, LoggingConfig,
    RetryConfig, StoreBackend, StoreConfig, VitalisConfig,
};
