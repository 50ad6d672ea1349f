//! Configuration schema types
//!
//! Defines the configuration structure mapped from `vitalis.toml`.
//! Secrets (store keys, API keys) are held in `secrecy` containers so they
//! are zeroed on drop and redacted in debug output.

use secrecy::SecretString;
use serde::Deserialize;

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Azure Cosmos DB document store
    CosmosDb,
    /// Process-local in-memory store (dev and tests)
    #[default]
    Memory,
}

/// Main vitalis configuration
///
/// Root structure mapped from the TOML file. The `[identity]` and `[ai]`
/// sections are optional: commands that need them fail with a
/// configuration error instead of blocking the rest of the tool.
#[derive(Debug, Clone, Deserialize)]
pub struct VitalisConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Store backend selection
    #[serde(default)]
    pub store: StoreConfig,

    /// Azure Cosmos DB configuration (required if store.backend = cosmosdb)
    #[serde(default)]
    pub cosmosdb: Option<CosmosDbConfig>,

    /// Identity provider configuration
    #[serde(default)]
    pub identity: Option<IdentityConfig>,

    /// Generative-AI endpoint configuration
    #[serde(default)]
    pub ai: Option<AiConfig>,

    /// Measurement device settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VitalisConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid, or if the
    /// selected store backend is missing its section.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;

        match self.store.backend {
            StoreBackend::CosmosDb => match self.cosmosdb {
                Some(ref config) => config.validate()?,
                None => {
                    return Err(
                        "cosmosdb configuration is required when store.backend = 'cosmosdb'"
                            .to_string(),
                    )
                }
            },
            StoreBackend::Memory => {}
        }

        if let Some(ref identity) = self.identity {
            identity.validate()?;
        }
        if let Some(ref ai) = self.ai {
            ai.validate()?;
        }
        self.device.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// The identity section, or a configuration error naming it
    pub fn identity_required(&self) -> Result<&IdentityConfig, String> {
        self.identity
            .as_ref()
            .ok_or_else(|| "[identity] section is required for account commands".to_string())
    }

    /// The AI section, or a configuration error naming it
    pub fn ai_required(&self) -> Result<&AiConfig, String> {
        self.ai
            .as_ref()
            .ok_or_else(|| "[ai] section is required for import and insights".to_string())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in logs
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("application.name cannot be empty".to_string());
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!(
                "application.log_level must be one of trace, debug, info, warn, error; got '{other}'"
            )),
        }
    }
}

/// Store backend selection block
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// Which backend persists vitals
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Azure Cosmos DB configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CosmosDbConfig {
    /// Account endpoint, e.g. `https://{account}.documents.azure.com:443/`
    pub endpoint: String,

    /// Account key
    pub key: SecretString,

    /// Database name
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Container holding one latest-vitals snapshot per user
    #[serde(default = "default_latest_container")]
    pub latest_container: String,

    /// Container holding the append-only history sequence
    #[serde(default = "default_history_container")]
    pub history_container: String,
}

impl CosmosDbConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.trim().is_empty() {
            return Err("cosmosdb.endpoint cannot be empty".to_string());
        }
        if !self.endpoint.starts_with("https://") {
            return Err("cosmosdb.endpoint must be an https:// URL".to_string());
        }
        if self.key.expose_secret().trim().is_empty() {
            return Err("cosmosdb.key cannot be empty".to_string());
        }
        if self.database_name.trim().is_empty() {
            return Err("cosmosdb.database_name cannot be empty".to_string());
        }
        if self.latest_container.trim().is_empty()
            || self.history_container.trim().is_empty()
        {
            return Err("cosmosdb container names cannot be empty".to_string());
        }
        if self.latest_container == self.history_container {
            return Err(
                "cosmosdb.latest_container and cosmosdb.history_container must differ".to_string(),
            );
        }
        Ok(())
    }
}

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// REST base URL of the identity provider
    #[serde(default = "default_identity_base_url")]
    pub base_url: String,

    /// Project API key
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
}

impl IdentityConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("identity.base_url cannot be empty".to_string());
        }
        if self.api_key.expose_secret().trim().is_empty() {
            return Err("identity.api_key cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("identity.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Generative-AI endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// REST base URL of the generative endpoint
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    /// API key
    pub api_key: SecretString,

    /// Model identifier for text and vision calls
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Request timeout in seconds
    ///
    /// Vision-model calls can hang; every request carries this bound so a
    /// stuck call never blocks the initiating action indefinitely.
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,

    /// Retry behavior for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.trim().is_empty() {
            return Err("ai.base_url cannot be empty".to_string());
        }
        if self.api_key.expose_secret().trim().is_empty() {
            return Err("ai.api_key cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("ai.model cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("ai.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Retry behavior with exponential backoff
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Multiplier applied per attempt
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Upper bound on any single delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Measurement device settings
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Capacity of the bounded heart-rate notification channel
    ///
    /// When the consumer lags behind the sensor, older updates are dropped;
    /// the dashboard only ever wants the most recent readings anyway.
    #[serde(default = "default_heart_rate_buffer")]
    pub heart_rate_buffer: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            heart_rate_buffer: default_heart_rate_buffer(),
        }
    }
}

impl DeviceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.heart_rate_buffer == 0 {
            return Err("device.heart_rate_buffer must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(format!(
                "logging.local_rotation must be 'daily' or 'hourly'; got '{other}'"
            )),
        }
    }
}

fn default_app_name() -> String {
    "vitalis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_name() -> String {
    "vitalis".to_string()
}

fn default_latest_container() -> String {
    "latest_vitals".to_string()
}

fn default_history_container() -> String {
    "vitals_history".to_string()
}

fn default_identity_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_heart_rate_buffer() -> usize {
    32
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
