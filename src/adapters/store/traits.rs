//! Store abstraction traits
//!
//! This module defines the trait that store backends must implement to
//! persist vitals for vitalis. Backends deal in raw document operations;
//! defaults, leniency and logging live in the repository layer on top.

use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VitalRecord;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store backend trait for vitals persistence
///
/// Two logical collections per backend: a singleton latest-vitals snapshot
/// keyed by user id (replace semantics, never merged by the store), and an
/// append-only history sequence with store-generated ids.
#[async_trait]
pub trait VitalsStore: Send + Sync {
    /// Test the backend connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the backing containers exist, creating them if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if a container cannot be created or accessed.
    async fn ensure_containers(&self) -> Result<()>;

    /// Point lookup of the latest-vitals snapshot
    ///
    /// Returns `Ok(None)` when the user has no snapshot yet; absence is a
    /// normal state, not an error.
    async fn get_latest(&self, user_id: &UserId) -> Result<Option<VitalRecord>>;

    /// Full-replace write of the latest-vitals snapshot
    ///
    /// The snapshot is keyed by the record's `user_id`. Field-level merging
    /// is the caller's responsibility and happens before this write.
    async fn put_latest(&self, record: &VitalRecord) -> Result<()>;

    /// Remove the latest-vitals snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete. Deleting an
    /// absent snapshot is not an error.
    async fn delete_latest(&self, user_id: &UserId) -> Result<()>;

    /// Append one record to the user's history sequence
    ///
    /// The store generates a unique id and returns it. History entries are
    /// never overwritten.
    async fn insert_history(&self, record: &VitalRecord) -> Result<RecordId>;

    /// Query the history sequence, `date` descending, optionally capped
    async fn query_history(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<VitalRecord>>;

    /// Query history entries in the closed interval `[start, end]`
    ///
    /// Both bounds inclusive, `date` descending.
    async fn query_history_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<VitalRecord>>;
}
