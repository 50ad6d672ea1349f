//! Cosmos DB store backend
//!
//! Implements [`VitalsStore`] over [`CosmosVitalsClient`]. The latest
//! snapshot is a point document whose id equals the owning user's id, so
//! an upsert is exactly the full-replace write the dashboard contract
//! requires. History entries are created with fresh UUIDs and queried
//! with date-ordered SQL.

use crate::adapters::store::cosmos::client::CosmosVitalsClient;
use crate::adapters::store::traits::VitalsStore;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VitalRecord;
use crate::domain::{Result, StoreError, VitalError};
use async_trait::async_trait;
use azure_data_cosmos::PartitionKey;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::StreamExt;
use std::sync::Arc;

/// Cosmos DB implementation of the store trait
pub struct CosmosStore {
    client: Arc<CosmosVitalsClient>,
}

impl CosmosStore {
    /// Create a new Cosmos store backend
    pub fn new(client: CosmosVitalsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a history query and collect all matching records
    async fn collect_history(&self, query: String, user_id: &UserId) -> Result<Vec<VitalRecord>> {
        let container = self.client.history_container();
        let partition_key = PartitionKey::from(user_id.as_str().to_string());

        let mut response = container
            .query_items::<VitalRecord>(query, partition_key, None)
            .map_err(|e| {
                VitalError::Store(StoreError::QueryFailed(format!(
                    "Failed to create history query: {e}"
                )))
            })?;

        let mut records = Vec::new();
        while let Some(item) = response.next().await {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(VitalError::Store(StoreError::QueryFailed(format!(
                        "Failed to fetch history entries: {e}"
                    ))));
                }
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl VitalsStore for CosmosStore {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_containers(&self) -> Result<()> {
        self.client.ensure_containers().await
    }

    async fn get_latest(&self, user_id: &UserId) -> Result<Option<VitalRecord>> {
        let container = self.client.latest_container();
        let partition_key = PartitionKey::from(user_id.as_str().to_string());

        tracing::debug!(user_id = %user_id, "Reading latest-vitals snapshot");

        match container
            .read_item::<VitalRecord>(partition_key, user_id.as_str(), None)
            .await
        {
            Ok(response) => {
                let record = response.into_body().map_err(|e| {
                    VitalError::Store(StoreError::DeserializationFailed(format!(
                        "Failed to deserialize latest snapshot: {e}"
                    )))
                })?;
                Ok(Some(record))
            }
            Err(e) => {
                if e.to_string().contains("404") || e.to_string().contains("NotFound") {
                    tracing::debug!(user_id = %user_id, "No latest snapshot yet");
                    Ok(None)
                } else {
                    Err(VitalError::Store(StoreError::QueryFailed(format!(
                        "Failed to read latest snapshot: {e}"
                    ))))
                }
            }
        }
    }

    async fn put_latest(&self, record: &VitalRecord) -> Result<()> {
        let container = self.client.latest_container();
        let partition_key = PartitionKey::from(record.user_id.as_str().to_string());

        // The snapshot document id is the user id, so upsert replaces the
        // previous snapshot wholesale.
        let mut document = record.clone();
        document.id = Some(
            RecordId::new(record.user_id.as_str()).map_err(VitalError::Validation)?,
        );

        tracing::debug!(user_id = %record.user_id, "Replacing latest-vitals snapshot");

        container
            .upsert_item(partition_key, &document, None)
            .await
            .map_err(|e| {
                VitalError::Store(StoreError::WriteFailed(format!(
                    "Failed to replace latest snapshot: {e}"
                )))
            })?;

        Ok(())
    }

    async fn delete_latest(&self, user_id: &UserId) -> Result<()> {
        let container = self.client.latest_container();
        let partition_key = PartitionKey::from(user_id.as_str().to_string());

        tracing::debug!(user_id = %user_id, "Deleting latest-vitals snapshot");

        match container
            .delete_item(partition_key, user_id.as_str(), None)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.to_string().contains("404") || e.to_string().contains("NotFound") {
                    Ok(())
                } else {
                    Err(VitalError::Store(StoreError::DeleteFailed(format!(
                        "Failed to delete latest snapshot: {e}"
                    ))))
                }
            }
        }
    }

    async fn insert_history(&self, record: &VitalRecord) -> Result<RecordId> {
        let container = self.client.history_container();
        let partition_key = PartitionKey::from(record.user_id.as_str().to_string());

        let id = RecordId::generate();
        let mut document = record.clone();
        document.id = Some(id.clone());

        tracing::debug!(user_id = %record.user_id, record_id = %id, "Appending history entry");

        container
            .create_item(partition_key, &document, None)
            .await
            .map_err(|e| {
                let text = e.to_string();
                if text.contains("429") || text.contains("TooManyRequests") {
                    VitalError::Store(StoreError::Throttled(text))
                } else {
                    VitalError::Store(StoreError::WriteFailed(format!(
                        "Failed to append history entry: {text}"
                    )))
                }
            })?;

        Ok(id)
    }

    async fn query_history(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<VitalRecord>> {
        let query = match limit {
            Some(n) => format!("SELECT TOP {n} * FROM c ORDER BY c.date DESC"),
            None => "SELECT * FROM c ORDER BY c.date DESC".to_string(),
        };
        self.collect_history(query, user_id).await
    }

    async fn query_history_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<VitalRecord>> {
        // Closed interval on both ends. RFC 3339 UTC strings compare
        // lexicographically in date order.
        let query = format!(
            "SELECT * FROM c WHERE c.date >= '{}' AND c.date <= '{}' ORDER BY c.date DESC",
            start.to_rfc3339_opts(SecondsFormat::Micros, true),
            end.to_rfc3339_opts(SecondsFormat::Micros, true),
        );
        self.collect_history(query, user_id).await
    }
}
