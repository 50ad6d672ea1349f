//! Vitals repository
//!
//! The behavior layer over the store backend. Write paths and the
//! single-record read are strict: store failures propagate so an explicit
//! save never silently no-ops. The history and range reads are lenient:
//! on failure they log and return empty so dashboard rendering never
//! blocks on a history error. That asymmetry is deliberate.

use crate::adapters::store::VitalsStore;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VitalRecord;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Repository over a store backend
#[derive(Clone)]
pub struct VitalsRepository {
    store: Arc<dyn VitalsStore>,
}

impl VitalsRepository {
    /// Create a repository over a store backend
    pub fn new(store: Arc<dyn VitalsStore>) -> Self {
        Self { store }
    }

    /// Full-replace write of the user's latest-vitals snapshot
    ///
    /// The record should already be merged; the store replaces wholesale.
    ///
    /// # Errors
    ///
    /// Propagates store failures; an explicit save must not silently fail.
    pub async fn update_latest(&self, record: &VitalRecord) -> Result<()> {
        self.store.put_latest(record).await?;
        tracing::info!(user_id = %record.user_id, "Latest vitals updated");
        Ok(())
    }

    /// Append one record to the user's history sequence
    ///
    /// Independent of the latest-snapshot write: callers that want both
    /// must invoke both, and there is no atomicity between the two.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn append_history(&self, record: &VitalRecord) -> Result<RecordId> {
        let id = self.store.insert_history(record).await?;
        tracing::info!(user_id = %record.user_id, record_id = %id, "History entry appended");
        Ok(id)
    }

    /// Point lookup of the latest-vitals snapshot
    ///
    /// Absence is a normal state for new users: it yields an empty record
    /// shape, not an error.
    ///
    /// # Errors
    ///
    /// Propagates store failures (unlike the history reads).
    pub async fn latest(&self, user_id: &UserId) -> Result<VitalRecord> {
        let snapshot = self.store.get_latest(user_id).await?;
        Ok(snapshot.unwrap_or_else(|| VitalRecord::empty(user_id.clone())))
    }

    /// History entries, date descending, optionally capped
    ///
    /// Lenient: a read failure logs and yields an empty sequence.
    pub async fn history(&self, user_id: &UserId, limit: Option<usize>) -> Vec<VitalRecord> {
        match self.store.query_history(user_id, limit).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "History read failed, returning empty");
                Vec::new()
            }
        }
    }

    /// History entries in the closed interval `[start, end]`
    ///
    /// Lenient, like [`VitalsRepository::history`].
    pub async fn history_in_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<VitalRecord> {
        match self.store.query_history_range(user_id, start, end).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Range read failed, returning empty");
                Vec::new()
            }
        }
    }

    /// Remove the latest-vitals snapshot
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn delete_latest(&self, user_id: &UserId) -> Result<()> {
        self.store.delete_latest(user_id).await?;
        tracing::info!(user_id = %user_id, "Latest vitals deleted");
        Ok(())
    }
}
