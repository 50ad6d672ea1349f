//! Cosmos DB client implementation
//!
//! Connection management and container provisioning for the Cosmos DB
//! store backend. Two containers back the vitals model: a singleton
//! latest-vitals snapshot per user and an append-only history sequence,
//! both partitioned by `/userId`.

use crate::config::CosmosDbConfig;
use crate::domain::{Result, StoreError, VitalError};
use azure_core::credentials::Secret;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::{
    ContainerProperties, IndexingPolicy, PartitionKeyDefinition, PartitionKeyKind,
};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions};
use std::borrow::Cow;

/// Partition key path shared by both containers
const PARTITION_KEY_PATH: &str = "/userId";

/// Cosmos DB client for vitalis
///
/// Wraps the SDK client and exposes the two container handles the store
/// backend works with.
pub struct CosmosVitalsClient {
    /// Cosmos DB client
    client: CosmosClient,

    /// Database client
    database: DatabaseClient,

    /// Configuration
    config: CosmosDbConfig,
}

impl CosmosVitalsClient {
    /// Create a new Cosmos DB client
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created from the
    /// configured endpoint and key.
    pub fn new(config: CosmosDbConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key = Secret::new(config.key.expose_secret().clone());
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(&config.endpoint, key, options).map_err(|e| {
            VitalError::Store(StoreError::ConnectionFailed(format!(
                "Failed to create Cosmos client: {e}"
            )))
        })?;

        let database = client.database_client(&config.database_name);

        Ok(Self {
            client,
            database,
            config,
        })
    }

    /// Test the connection by reading the database
    pub async fn test_connection(&self) -> Result<()> {
        self.database.read(None).await.map_err(|e| {
            VitalError::Store(StoreError::ConnectionFailed(format!(
                "Connection test failed: {e}"
            )))
        })?;

        Ok(())
    }

    /// Ensure the database and both containers exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database or a container cannot be created.
    pub async fn ensure_containers(&self) -> Result<()> {
        self.ensure_database_exists().await?;
        self.ensure_container_exists(&self.config.latest_container)
            .await?;
        self.ensure_container_exists(&self.config.history_container)
            .await?;
        Ok(())
    }

    async fn ensure_database_exists(&self) -> Result<()> {
        match self.database.read(None).await {
            Ok(_) => {
                tracing::debug!(database = %self.config.database_name, "Database already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(database = %self.config.database_name, "Creating database");

                self.client
                    .create_database(&self.config.database_name, None)
                    .await
                    .map_err(|e| {
                        VitalError::Store(StoreError::ContainerCreationFailed(format!(
                            "Failed to create database: {e}"
                        )))
                    })?;

                Ok(())
            }
        }
    }

    async fn ensure_container_exists(&self, container_name: &str) -> Result<()> {
        let container = self.database.container_client(container_name);

        match container.read(None).await {
            Ok(_) => {
                tracing::debug!(container = %container_name, "Container already exists");
                Ok(())
            }
            Err(_) => {
                tracing::info!(container = %container_name, "Creating container");

                let partition_key_def = PartitionKeyDefinition {
                    paths: vec![PARTITION_KEY_PATH.to_string()],
                    kind: PartitionKeyKind::Hash,
                    version: None,
                };

                let properties = ContainerProperties {
                    id: Cow::Owned(container_name.to_string()),
                    partition_key: partition_key_def,
                    indexing_policy: Some(IndexingPolicy::default()),
                    ..Default::default()
                };

                self.database
                    .create_container(properties, None)
                    .await
                    .map_err(|e| {
                        VitalError::Store(StoreError::ContainerCreationFailed(format!(
                            "Failed to create container {container_name}: {e}"
                        )))
                    })?;

                Ok(())
            }
        }
    }

    /// Container holding one latest-vitals snapshot per user
    pub fn latest_container(&self) -> ContainerClient {
        self.database
            .container_client(&self.config.latest_container)
    }

    /// Container holding the append-only history sequence
    pub fn history_container(&self) -> ContainerClient {
        self.database
            .container_client(&self.config.history_container)
    }

    /// Get the database name
    pub fn database_name(&self) -> &str {
        &self.config.database_name
    }
}
