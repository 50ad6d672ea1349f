//! In-memory store backend
//!
//! A process-local implementation of [`VitalsStore`] backed by tokio
//! RwLock maps. Used as the dev/test backend: it exercises the full write
//! contract (replace semantics, generated history ids, ordered queries)
//! without a live document database.

use crate::adapters::store::traits::VitalsStore;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VitalRecord;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of the store trait
#[derive(Default)]
pub struct MemoryStore {
    latest: RwLock<HashMap<String, VitalRecord>>,
    history: RwLock<HashMap<String, Vec<VitalRecord>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VitalsStore for MemoryStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_containers(&self) -> Result<()> {
        Ok(())
    }

    async fn get_latest(&self, user_id: &UserId) -> Result<Option<VitalRecord>> {
        let latest = self.latest.read().await;
        Ok(latest.get(user_id.as_str()).cloned())
    }

    async fn put_latest(&self, record: &VitalRecord) -> Result<()> {
        let mut latest = self.latest.write().await;
        let mut stored = record.clone();
        // The snapshot document is keyed by its owner.
        stored.id = Some(RecordId::new(record.user_id.as_str()).map_err(
            crate::domain::VitalError::Validation,
        )?);
        latest.insert(record.user_id.as_str().to_string(), stored);
        Ok(())
    }

    async fn delete_latest(&self, user_id: &UserId) -> Result<()> {
        let mut latest = self.latest.write().await;
        latest.remove(user_id.as_str());
        Ok(())
    }

    async fn insert_history(&self, record: &VitalRecord) -> Result<RecordId> {
        let id = RecordId::generate();
        let mut stored = record.clone();
        stored.id = Some(id.clone());

        let mut history = self.history.write().await;
        history
            .entry(record.user_id.as_str().to_string())
            .or_default()
            .push(stored);
        Ok(id)
    }

    async fn query_history(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<VitalRecord>> {
        let history = self.history.read().await;
        let mut entries = history
            .get(user_id.as_str())
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    async fn query_history_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<VitalRecord>> {
        let history = self.history.read().await;
        let mut entries: Vec<VitalRecord> = history
            .get(user_id.as_str())
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.date >= start && r.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}
