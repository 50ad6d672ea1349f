//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VitalisConfig;
use crate::domain::errors::VitalError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::{Secret, SecretString};
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VitalisConfig
/// 4. Applies environment variable overrides (VITALIS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use vitalis::config::load_config;
///
/// let config = load_config("vitalis.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VitalisConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VitalError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VitalError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VitalisConfig = toml::from_str(&contents)
        .map_err(|e| VitalError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| VitalError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are skipped so documentation examples don't trip the
/// missing-variable check.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VitalError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the VITALIS_* prefix
///
/// Variables follow the pattern VITALIS_<SECTION>_<KEY>, for example
/// VITALIS_COSMOSDB_ENDPOINT or VITALIS_AI_MODEL.
fn apply_env_overrides(config: &mut VitalisConfig) {
    if let Ok(val) = std::env::var("VITALIS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(ref mut cosmos) = config.cosmosdb {
        if let Ok(val) = std::env::var("VITALIS_COSMOSDB_ENDPOINT") {
            cosmos.endpoint = val;
        }
        if let Ok(val) = std::env::var("VITALIS_COSMOSDB_KEY") {
            cosmos.key = secret(val);
        }
        if let Ok(val) = std::env::var("VITALIS_COSMOSDB_DATABASE_NAME") {
            cosmos.database_name = val;
        }
    }

    if let Some(ref mut identity) = config.identity {
        if let Ok(val) = std::env::var("VITALIS_IDENTITY_BASE_URL") {
            identity.base_url = val;
        }
        if let Ok(val) = std::env::var("VITALIS_IDENTITY_API_KEY") {
            identity.api_key = secret(val);
        }
    }

    if let Some(ref mut ai) = config.ai {
        if let Ok(val) = std::env::var("VITALIS_AI_BASE_URL") {
            ai.base_url = val;
        }
        if let Ok(val) = std::env::var("VITALIS_AI_API_KEY") {
            ai.api_key = secret(val);
        }
        if let Ok(val) = std::env::var("VITALIS_AI_MODEL") {
            ai.model = val;
        }
    }
}

fn secret(value: String) -> SecretString {
    Secret::new(value)
}
