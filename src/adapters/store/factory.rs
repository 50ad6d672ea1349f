//! Store backend factory
//!
//! Creates the configured store backend behind the [`VitalsStore`] trait.

use crate::adapters::store::cosmos::{CosmosStore, CosmosVitalsClient};
use crate::adapters::store::memory::MemoryStore;
use crate::adapters::store::traits::VitalsStore;
use crate::config::{StoreBackend, VitalisConfig};
use crate::domain::{Result, VitalError};
use std::sync::Arc;

/// Create a store backend based on the configuration
///
/// Examines `store.backend` and returns the matching implementation as an
/// Arc-wrapped trait object.
///
/// # Errors
///
/// Returns an error if the selected backend cannot be created.
pub fn create_store(config: &VitalisConfig) -> Result<Arc<dyn VitalsStore>> {
    match config.store.backend {
        StoreBackend::CosmosDb => {
            let cosmos_config = config.cosmosdb.as_ref().ok_or_else(|| {
                VitalError::Configuration(
                    "cosmosdb configuration is required when store.backend = 'cosmosdb'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating Cosmos DB store backend");
            let client = CosmosVitalsClient::new(cosmos_config.clone())?;
            Ok(Arc::new(CosmosStore::new(client)) as Arc<dyn VitalsStore>)
        }
        StoreBackend::Memory => {
            tracing::info!("Creating in-memory store backend");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn VitalsStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_creation() {
        let config: VitalisConfig = toml::from_str("").unwrap();
        assert!(create_store(&config).is_ok());
    }

    #[test]
    fn test_cosmos_backend_without_section_fails() {
        let config: VitalisConfig = toml::from_str(
            r#"
[store]
backend = "cosmosdb"
"#,
        )
        .unwrap();
        let err = create_store(&config).err().unwrap();
        assert!(matches!(err, VitalError::Configuration(_)));
    }
}
