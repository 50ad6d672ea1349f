//! VitalRecord domain model
//!
//! One measurement snapshot. All measurement fields are optional; a record
//! that populates none of them is "empty" and is rejected by write paths
//! that require at least one vital present.

use super::ids::{RecordId, UserId};
use super::vital::{VitalKind, VitalSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vital-sign measurement snapshot
///
/// Serialized with camelCase field names, matching the document shape used
/// by the store. The same type serves as the partial input to write paths,
/// the latest-vitals snapshot, and a history entry; only the `id` handling
/// differs (history entries get a store-generated id, the latest snapshot
/// is keyed by the owning user).
///
/// # Examples
///
/// ```
/// use vitalis::domain::{UserId, VitalRecord};
///
/// let user = UserId::new("user-1").unwrap();
/// let record = VitalRecord::builder(user)
///     .blood_pressure(150, 95)
///     .notes("after workout")
///     .build();
/// assert!(record.has_measurements());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalRecord {
    /// Store-assigned identifier (absent until persisted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Owner of the measurement, immutable after creation
    pub user_id: UserId,

    /// Instant the measurement was taken
    pub date: DateTime<Utc>,

    /// Provenance tag
    #[serde(default)]
    pub source: VitalSource,

    /// Systolic blood pressure, mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<u32>,

    /// Diastolic blood pressure, mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<u32>,

    /// Fasting blood sugar, mg/dL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar_fasting: Option<u32>,

    /// Post-meal blood sugar, mg/dL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar_post_meal: Option<u32>,

    /// Heart rate, bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,

    /// Pulse rate, bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_rate: Option<u32>,

    /// Body temperature, degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Oxygen saturation, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<u32>,

    /// Respiration rate, breaths per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiration_rate: Option<u32>,

    /// Body weight, kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Height, cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Body mass index (derived)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VitalRecord {
    /// Creates an empty record shape for a user
    ///
    /// This is what a point lookup returns when no snapshot exists yet;
    /// absence of a snapshot is a normal state for new users, not an error.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            id: None,
            user_id,
            date: Utc::now(),
            source: VitalSource::Manual,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            blood_sugar_fasting: None,
            blood_sugar_post_meal: None,
            heart_rate: None,
            pulse_rate: None,
            temperature: None,
            oxygen_saturation: None,
            respiration_rate: None,
            weight: None,
            height: None,
            bmi: None,
            notes: None,
        }
    }

    /// Creates a new builder for constructing a record
    pub fn builder(user_id: UserId) -> VitalRecordBuilder {
        VitalRecordBuilder::new(user_id)
    }

    /// Returns true if at least one measurement field is populated
    ///
    /// Notes alone do not make a record non-empty.
    pub fn has_measurements(&self) -> bool {
        self.blood_pressure_systolic.is_some()
            || self.blood_pressure_diastolic.is_some()
            || self.blood_sugar_fasting.is_some()
            || self.blood_sugar_post_meal.is_some()
            || self.heart_rate.is_some()
            || self.pulse_rate.is_some()
            || self.temperature.is_some()
            || self.oxygen_saturation.is_some()
            || self.respiration_rate.is_some()
            || self.weight.is_some()
            || self.height.is_some()
            || self.bmi.is_some()
    }

    /// Field-level merge with an incoming partial record
    ///
    /// Populated fields of `incoming` override; absent fields inherit from
    /// `self`. Date and source always come from `incoming` (they are
    /// default-filled on construction). The result carries no id: the
    /// latest snapshot is keyed by user, not by record id.
    ///
    /// Merging happens here, in application code, before the snapshot is
    /// written with full-replace semantics. The store never merges.
    pub fn merged_with(&self, incoming: &VitalRecord) -> VitalRecord {
        VitalRecord {
            id: None,
            user_id: incoming.user_id.clone(),
            date: incoming.date,
            source: incoming.source,
            blood_pressure_systolic: incoming
                .blood_pressure_systolic
                .or(self.blood_pressure_systolic),
            blood_pressure_diastolic: incoming
                .blood_pressure_diastolic
                .or(self.blood_pressure_diastolic),
            blood_sugar_fasting: incoming.blood_sugar_fasting.or(self.blood_sugar_fasting),
            blood_sugar_post_meal: incoming
                .blood_sugar_post_meal
                .or(self.blood_sugar_post_meal),
            heart_rate: incoming.heart_rate.or(self.heart_rate),
            pulse_rate: incoming.pulse_rate.or(self.pulse_rate),
            temperature: incoming.temperature.or(self.temperature),
            oxygen_saturation: incoming.oxygen_saturation.or(self.oxygen_saturation),
            respiration_rate: incoming.respiration_rate.or(self.respiration_rate),
            weight: incoming.weight.or(self.weight),
            height: incoming.height.or(self.height),
            bmi: incoming.bmi.or(self.bmi),
            notes: incoming.notes.clone().or_else(|| self.notes.clone()),
        }
    }

    /// Primary scalar value for a vital kind, if populated
    ///
    /// Blood pressure returns the systolic half; pair it with
    /// [`VitalRecord::blood_pressure_diastolic`] for status evaluation.
    pub fn primary_value(&self, kind: VitalKind) -> Option<f64> {
        match kind {
            VitalKind::BloodPressure => self.blood_pressure_systolic.map(f64::from),
            VitalKind::HeartRate => self.heart_rate.map(f64::from),
            VitalKind::PulseRate => self.pulse_rate.map(f64::from),
            VitalKind::BloodSugar => self.blood_sugar_fasting.map(f64::from),
            VitalKind::Temperature => self.temperature,
            VitalKind::OxygenSaturation => self.oxygen_saturation.map(f64::from),
            VitalKind::RespirationRate => self.respiration_rate.map(f64::from),
            VitalKind::Weight => self.weight,
        }
    }
}

/// Builder for constructing VitalRecord instances
///
/// Date and source default to creation time and `Manual` when not set,
/// which is where the repository's default-filling contract is satisfied.
#[derive(Debug)]
pub struct VitalRecordBuilder {
    record: VitalRecord,
    date_set: bool,
}

impl VitalRecordBuilder {
    /// Creates a builder for the given owner
    pub fn new(user_id: UserId) -> Self {
        Self {
            record: VitalRecord::empty(user_id),
            date_set: false,
        }
    }

    /// Sets the measurement instant (defaults to build time)
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.record.date = date;
        self.date_set = true;
        self
    }

    /// Sets the provenance tag (defaults to manual)
    pub fn source(mut self, source: VitalSource) -> Self {
        self.record.source = source;
        self
    }

    /// Sets both halves of a blood pressure reading, mmHg
    pub fn blood_pressure(mut self, systolic: u32, diastolic: u32) -> Self {
        self.record.blood_pressure_systolic = Some(systolic);
        self.record.blood_pressure_diastolic = Some(diastolic);
        self
    }

    /// Sets the systolic half only, mmHg
    pub fn systolic(mut self, value: u32) -> Self {
        self.record.blood_pressure_systolic = Some(value);
        self
    }

    /// Sets the diastolic half only, mmHg
    pub fn diastolic(mut self, value: u32) -> Self {
        self.record.blood_pressure_diastolic = Some(value);
        self
    }

    /// Sets the fasting blood sugar, mg/dL
    pub fn blood_sugar_fasting(mut self, value: u32) -> Self {
        self.record.blood_sugar_fasting = Some(value);
        self
    }

    /// Sets the post-meal blood sugar, mg/dL
    pub fn blood_sugar_post_meal(mut self, value: u32) -> Self {
        self.record.blood_sugar_post_meal = Some(value);
        self
    }

    /// Sets the heart rate, bpm
    pub fn heart_rate(mut self, value: u32) -> Self {
        self.record.heart_rate = Some(value);
        self
    }

    /// Sets the pulse rate, bpm
    pub fn pulse_rate(mut self, value: u32) -> Self {
        self.record.pulse_rate = Some(value);
        self
    }

    /// Sets the body temperature, degrees Celsius
    pub fn temperature(mut self, value: f64) -> Self {
        self.record.temperature = Some(value);
        self
    }

    /// Sets the oxygen saturation, percent
    pub fn oxygen_saturation(mut self, value: u32) -> Self {
        self.record.oxygen_saturation = Some(value);
        self
    }

    /// Sets the respiration rate, breaths per minute
    pub fn respiration_rate(mut self, value: u32) -> Self {
        self.record.respiration_rate = Some(value);
        self
    }

    /// Sets the body weight, kg
    pub fn weight(mut self, value: f64) -> Self {
        self.record.weight = Some(value);
        self
    }

    /// Sets the height, cm
    pub fn height(mut self, value: f64) -> Self {
        self.record.height = Some(value);
        self
    }

    /// Sets the derived body mass index
    pub fn bmi(mut self, value: f64) -> Self {
        self.record.bmi = Some(value);
        self
    }

    /// Sets free-text notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.record.notes = Some(notes.into());
        self
    }

    /// Builds the record, filling date and source defaults if absent
    pub fn build(mut self) -> VitalRecord {
        if !self.date_set {
            self.record.date = Utc::now();
        }
        self.record
    }
}
