//! Dashboard aggregation
//!
//! Composes the latest-vitals snapshot into a fixed set of named cards,
//! each annotated with a status tier and a recency string. Cards are
//! derived fresh on every render and never persisted.

use crate::core::recency::time_since;
use crate::core::status::{evaluate, StatusTier};
use crate::domain::{VitalKind, VitalRecord, DASHBOARD_KINDS};
use serde::Serialize;

/// Placeholder for an absent scalar value
const PLACEHOLDER: &str = "--";

/// Placeholder for an absent blood-pressure pair
const PLACEHOLDER_PAIR: &str = "--/--";

/// One dashboard card, ready for the rendering layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalCard {
    /// Which vital this card shows
    pub kind: VitalKind,
    /// Display label from the kind's metadata table
    pub label: &'static str,
    /// Unit label
    pub unit: &'static str,
    /// Icon key for the rendering layer
    pub icon: &'static str,
    /// Formatted value, or a placeholder when absent
    pub value: String,
    /// Clinical-alert tier for the shown value
    pub status: StatusTier,
    /// Relative-time string for the snapshot's timestamp
    pub recorded: String,
}

/// Builds the fixed card set from the latest snapshot
///
/// One card per tracked kind, in dashboard order. All cards share the
/// snapshot's single timestamp: the snapshot is one merged record, not a
/// per-field history.
pub fn build_dashboard(latest: &VitalRecord) -> Vec<VitalCard> {
    let recorded = time_since(latest.date);

    DASHBOARD_KINDS
        .iter()
        .map(|&kind| VitalCard {
            kind,
            label: kind.label(),
            unit: kind.unit(),
            icon: kind.icon(),
            value: format_value(latest, kind),
            status: card_status(latest, kind),
            recorded: recorded.clone(),
        })
        .collect()
}

/// Formats the card value for one kind
///
/// Blood pressure renders both halves or the pair placeholder when either
/// half is absent; temperature and weight use one decimal place; the rest
/// are integer strings.
fn format_value(record: &VitalRecord, kind: VitalKind) -> String {
    match kind {
        VitalKind::BloodPressure => {
            match (
                record.blood_pressure_systolic,
                record.blood_pressure_diastolic,
            ) {
                (Some(s), Some(d)) => format!("{s}/{d}"),
                _ => PLACEHOLDER_PAIR.to_string(),
            }
        }
        VitalKind::Temperature => record
            .temperature
            .map(|t| format!("{t:.1}"))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        VitalKind::Weight => record
            .weight
            .map(|w| format!("{w:.1}"))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        _ => record
            .primary_value(kind)
            .map(|v| format!("{}", v as i64))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

/// Status tier for one card
fn card_status(record: &VitalRecord, kind: VitalKind) -> StatusTier {
    match record.primary_value(kind) {
        Some(primary) => {
            let secondary = match kind {
                VitalKind::BloodPressure => {
                    record.blood_pressure_diastolic.map(f64::from)
                }
                _ => None,
            };
            evaluate(kind, primary, secondary)
        }
        None => StatusTier::Normal,
    }
}
