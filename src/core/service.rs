//! Vitals service
//!
//! The coordinator every creation path converges on: manual entry, device
//! streaming and document import all validate, merge and dual-write
//! through [`VitalsService::record`]. The two writes (replace latest,
//! append history) are sequential with no cross-write atomicity; the
//! dashboard re-reads the snapshot on every load, which is the
//! reconciliation point when a crash lands between them.

use crate::adapters::ai::DocumentExtractor;
use crate::adapters::store::VitalsStore;
use crate::core::dashboard::{build_dashboard, VitalCard};
use crate::core::export;
use crate::core::repository::VitalsRepository;
use crate::domain::ids::UserId;
use crate::domain::record::VitalRecord;
use crate::domain::{Result, VitalError, VitalSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Service coordinating reads, writes and view-model assembly
#[derive(Clone)]
pub struct VitalsService {
    repository: VitalsRepository,
}

impl VitalsService {
    /// Create a service over a store backend
    pub fn new(store: Arc<dyn VitalsStore>) -> Self {
        Self {
            repository: VitalsRepository::new(store),
        }
    }

    /// Access the underlying repository
    pub fn repository(&self) -> &VitalsRepository {
        &self.repository
    }

    /// Record a measurement: merge into the latest snapshot, then append
    /// to history
    ///
    /// Returns the merged snapshot as written. The snapshot write comes
    /// first so the dashboard is current even if the history append fails;
    /// the history entry is the draft itself, preserving what was actually
    /// measured in this event.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the draft has no measurement
    /// fields, or with a store error from either write.
    pub async fn record(&self, draft: VitalRecord) -> Result<VitalRecord> {
        if !draft.has_measurements() {
            return Err(VitalError::Validation(
                "At least one vital sign is required".to_string(),
            ));
        }

        let previous = self.repository.latest(&draft.user_id).await?;
        let merged = previous.merged_with(&draft);

        self.repository.update_latest(&merged).await?;
        self.repository.append_history(&draft).await?;

        tracing::info!(
            user_id = %draft.user_id,
            source = %draft.source,
            "Vitals recorded"
        );

        Ok(merged)
    }

    /// Record a device-streamed heart-rate reading
    pub async fn ingest_heart_rate(&self, user_id: UserId, bpm: u16) -> Result<VitalRecord> {
        let draft = VitalRecord::builder(user_id)
            .source(VitalSource::Device)
            .heart_rate(u32::from(bpm))
            .build();
        self.record(draft).await
    }

    /// Import vitals from a document via the extraction adapter
    ///
    /// `Ok(None)` means "no vital signs found": a normal outcome for
    /// documents that are lab reports rather than vitals reports. Nothing
    /// is written in that case. A record whose only content is notes is
    /// treated the same way.
    pub async fn import_document(
        &self,
        user_id: UserId,
        extractor: &DocumentExtractor,
        data: &[u8],
        mime_type: &str,
    ) -> Result<Option<VitalRecord>> {
        let extracted = extractor.extract(user_id, data, mime_type).await?;

        match extracted {
            Some(draft) if draft.has_measurements() => {
                let merged = self.record(draft).await?;
                Ok(Some(merged))
            }
            _ => Ok(None),
        }
    }

    /// Dashboard cards built from the latest snapshot
    pub async fn dashboard(&self, user_id: &UserId) -> Result<Vec<VitalCard>> {
        let latest = self.repository.latest(user_id).await?;
        Ok(build_dashboard(&latest))
    }

    /// History entries, date descending, optionally capped
    pub async fn history(&self, user_id: &UserId, limit: Option<usize>) -> Vec<VitalRecord> {
        self.repository.history(user_id, limit).await
    }

    /// History entries in the closed interval `[start, end]`
    pub async fn history_in_range(
        &self,
        user_id: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<VitalRecord> {
        self.repository.history_in_range(user_id, start, end).await
    }

    /// Remove the latest-vitals snapshot
    pub async fn delete_latest(&self, user_id: &UserId) -> Result<()> {
        self.repository.delete_latest(user_id).await
    }

    /// Render history as the fixed-column CSV export
    pub async fn export_csv(
        &self,
        user_id: &UserId,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> String {
        let records = self.gather(user_id, range).await;
        export::to_csv(&records)
    }

    /// Render history as the JSON export wrapper
    pub async fn export_json(
        &self,
        user_id: &UserId,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<String> {
        let records = self.gather(user_id, range).await;
        export::to_json(&records)
    }

    async fn gather(
        &self,
        user_id: &UserId,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Vec<VitalRecord> {
        match range {
            Some((start, end)) => self.repository.history_in_range(user_id, start, end).await,
            None => self.repository.history(user_id, None).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn service() -> VitalsService {
        VitalsService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected_before_any_write() {
        let service = service();
        let draft = VitalRecord::builder(user()).notes("just a note").build();

        let err = service.record(draft).await.unwrap_err();
        assert!(matches!(err, VitalError::Validation(_)));
        assert!(service.history(&user(), None).await.is_empty());
    }

    #[tokio::test]
    async fn test_record_merges_into_latest_and_appends_history() {
        let service = service();

        let first = VitalRecord::builder(user()).blood_pressure(120, 80).build();
        service.record(first).await.unwrap();

        let second = VitalRecord::builder(user()).heart_rate(88).build();
        let merged = service.record(second).await.unwrap();

        // Merge keeps the earlier blood pressure alongside the new reading.
        assert_eq!(merged.blood_pressure_systolic, Some(120));
        assert_eq!(merged.heart_rate, Some(88));

        // History holds the two drafts as measured, unmerged.
        let history = service.history(&user(), None).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].blood_pressure_systolic, None);
        assert_eq!(history[0].heart_rate, Some(88));
    }

    #[tokio::test]
    async fn test_heart_rate_ingest_is_device_sourced() {
        let service = service();
        let written = service.ingest_heart_rate(user(), 64).await.unwrap();
        assert_eq!(written.heart_rate, Some(64));

        let history = service.history(&user(), None).await;
        assert_eq!(history[0].source, VitalSource::Device);
    }

    #[tokio::test]
    async fn test_dashboard_reflects_merged_snapshot() {
        let service = service();
        let draft = VitalRecord::builder(user()).blood_pressure(150, 95).build();
        service.record(draft).await.unwrap();

        let cards = service.dashboard(&user()).await.unwrap();
        assert_eq!(cards[0].value, "150/95");
        assert_eq!(cards[0].status.to_string(), "critical");
    }
}
