//! Vital-sign type tags and provenance
//!
//! The set of tracked vital signs is a closed enum with an associated
//! display-metadata table (label, unit, icon key). Screen layers look
//! these up by tag instead of carrying free-form strings around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a measurement
///
/// Records where a [`crate::domain::VitalRecord`] came from. The tag is
/// informational only and is not validated against the caller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VitalSource {
    /// Entered by hand through a form or CLI flags
    #[default]
    Manual,
    /// Streamed from a paired measurement device
    Device,
    /// Extracted from an imported document
    Imported,
}

impl fmt::Display for VitalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VitalSource::Manual => "manual",
            VitalSource::Device => "device",
            VitalSource::Imported => "imported",
        };
        write!(f, "{s}")
    }
}

/// Tracked vital-sign kinds
///
/// A closed set of tags. Blood pressure is composite (systolic/diastolic);
/// every other kind is a single scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalKind {
    BloodPressure,
    HeartRate,
    PulseRate,
    BloodSugar,
    Temperature,
    OxygenSaturation,
    RespirationRate,
    Weight,
}

/// Dashboard card order. One card per entry, always all six.
pub const DASHBOARD_KINDS: [VitalKind; 6] = [
    VitalKind::BloodPressure,
    VitalKind::HeartRate,
    VitalKind::BloodSugar,
    VitalKind::Temperature,
    VitalKind::OxygenSaturation,
    VitalKind::Weight,
];

impl VitalKind {
    /// Human-readable card label
    pub fn label(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "Blood Pressure",
            VitalKind::HeartRate => "Heart Rate",
            VitalKind::PulseRate => "Pulse Rate",
            VitalKind::BloodSugar => "Blood Sugar",
            VitalKind::Temperature => "Temperature",
            VitalKind::OxygenSaturation => "Oxygen Saturation",
            VitalKind::RespirationRate => "Respiration Rate",
            VitalKind::Weight => "Weight",
        }
    }

    /// Unit label shown next to the value
    pub fn unit(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "mmHg",
            VitalKind::HeartRate | VitalKind::PulseRate => "bpm",
            VitalKind::BloodSugar => "mg/dL",
            VitalKind::Temperature => "\u{00b0}C",
            VitalKind::OxygenSaturation => "%",
            VitalKind::RespirationRate => "breaths/min",
            VitalKind::Weight => "kg",
        }
    }

    /// Icon key for the rendering layer
    pub fn icon(&self) -> &'static str {
        match self {
            VitalKind::BloodPressure => "heart-pulse",
            VitalKind::HeartRate => "heartbeat",
            VitalKind::PulseRate => "pulse",
            VitalKind::BloodSugar => "droplet",
            VitalKind::Temperature => "thermometer",
            VitalKind::OxygenSaturation => "lungs",
            VitalKind::RespirationRate => "wind",
            VitalKind::Weight => "scale",
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
