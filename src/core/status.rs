//! Clinical status evaluation
//!
//! Maps a measurement (or pair, for blood pressure) to a coarse
//! clinical-alert tier using fixed thresholds. Pure and deterministic:
//! same inputs, same tier, no side effects.
//!
//! Non-finite input yields [`StatusTier::Normal`]; missing or invalid
//! readings are treated as "nothing to flag" rather than as alerts.

use crate::domain::VitalKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse clinical-risk bucket derived from fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    /// Within the normal range
    Normal,
    /// Outside the normal range, worth attention
    Alert,
    /// Clinically significant deviation
    Critical,
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusTier::Normal => "normal",
            StatusTier::Alert => "alert",
            StatusTier::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Evaluates a measurement against the fixed thresholds for its kind
///
/// `primary` carries the scalar value, or the systolic half for blood
/// pressure; `secondary` is the diastolic half and is ignored for every
/// other kind. Kinds without thresholds (weight, respiration rate) and
/// non-finite inputs evaluate to `Normal`.
///
/// Blood pressure precedence, first match wins: hypotension alert,
/// hypertensive critical, elevated alert.
///
/// # Examples
///
/// ```
/// use vitalis::core::status::{evaluate, StatusTier};
/// use vitalis::domain::VitalKind;
///
/// let tier = evaluate(VitalKind::BloodPressure, 150.0, Some(95.0));
/// assert_eq!(tier, StatusTier::Critical);
/// ```
pub fn evaluate(kind: VitalKind, primary: f64, secondary: Option<f64>) -> StatusTier {
    if !primary.is_finite() {
        return StatusTier::Normal;
    }

    match kind {
        VitalKind::BloodPressure => {
            let diastolic = match secondary {
                Some(d) if d.is_finite() => d,
                _ => return StatusTier::Normal,
            };
            let systolic = primary;
            if systolic < 90.0 || diastolic < 60.0 {
                StatusTier::Alert
            } else if systolic >= 140.0 || diastolic >= 90.0 {
                StatusTier::Critical
            } else if systolic >= 121.0 || diastolic >= 81.0 {
                StatusTier::Alert
            } else {
                StatusTier::Normal
            }
        }
        VitalKind::BloodSugar => {
            if primary < 70.0 {
                StatusTier::Alert
            } else if primary >= 126.0 {
                StatusTier::Critical
            } else if primary >= 100.0 {
                StatusTier::Alert
            } else {
                StatusTier::Normal
            }
        }
        VitalKind::HeartRate | VitalKind::PulseRate => {
            if !(60.0..=100.0).contains(&primary) {
                StatusTier::Alert
            } else {
                StatusTier::Normal
            }
        }
        VitalKind::OxygenSaturation => {
            if primary < 92.0 {
                StatusTier::Critical
            } else if primary < 95.0 {
                StatusTier::Alert
            } else {
                StatusTier::Normal
            }
        }
        VitalKind::Temperature => {
            if primary < 35.0 {
                StatusTier::Alert
            } else if primary >= 38.0 {
                StatusTier::Critical
            } else if primary > 37.2 {
                StatusTier::Alert
            } else {
                StatusTier::Normal
            }
        }
        // No thresholds defined for these kinds
        VitalKind::Weight | VitalKind::RespirationRate => StatusTier::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(119.0, 79.0 => StatusTier::Normal ; "textbook normal")]
    #[test_case(89.0, 70.0 => StatusTier::Alert ; "hypotensive systolic")]
    #[test_case(110.0, 59.0 => StatusTier::Alert ; "hypotensive diastolic")]
    #[test_case(140.0, 70.0 => StatusTier::Critical ; "hypertensive systolic boundary")]
    #[test_case(120.0, 90.0 => StatusTier::Critical ; "hypertensive diastolic boundary")]
    #[test_case(121.0, 80.0 => StatusTier::Alert ; "elevated systolic boundary")]
    #[test_case(120.0, 81.0 => StatusTier::Alert ; "elevated diastolic boundary")]
    #[test_case(120.0, 80.0 => StatusTier::Normal ; "just below elevated")]
    #[test_case(150.0, 95.0 => StatusTier::Critical ; "both halves hypertensive")]
    fn blood_pressure_tiers(systolic: f64, diastolic: f64) -> StatusTier {
        evaluate(VitalKind::BloodPressure, systolic, Some(diastolic))
    }

    #[test]
    fn blood_pressure_critical_precedes_elevated() {
        // 145/85 matches both the critical and the elevated rule; the
        // critical rule wins in precedence order.
        assert_eq!(
            evaluate(VitalKind::BloodPressure, 145.0, Some(85.0)),
            StatusTier::Critical
        );
    }

    #[test]
    fn blood_pressure_hypotension_precedes_hypertension() {
        // 85/95 is simultaneously hypotensive-systolic and
        // hypertensive-diastolic; the hypotension rule is checked first.
        assert_eq!(
            evaluate(VitalKind::BloodPressure, 85.0, Some(95.0)),
            StatusTier::Alert
        );
    }

    #[test]
    fn blood_pressure_missing_diastolic_is_normal() {
        assert_eq!(
            evaluate(VitalKind::BloodPressure, 150.0, None),
            StatusTier::Normal
        );
        assert_eq!(
            evaluate(VitalKind::BloodPressure, 150.0, Some(f64::NAN)),
            StatusTier::Normal
        );
    }

    #[test_case(69.9 => StatusTier::Alert ; "hypoglycemic")]
    #[test_case(70.0 => StatusTier::Normal ; "lower bound")]
    #[test_case(99.0 => StatusTier::Normal ; "upper normal")]
    #[test_case(100.0 => StatusTier::Alert ; "prediabetic boundary")]
    #[test_case(125.9 => StatusTier::Alert ; "just below diabetic")]
    #[test_case(126.0 => StatusTier::Critical ; "diabetic boundary")]
    fn blood_sugar_tiers(fasting: f64) -> StatusTier {
        evaluate(VitalKind::BloodSugar, fasting, None)
    }

    #[test_case(59.0 => StatusTier::Alert ; "bradycardia")]
    #[test_case(60.0 => StatusTier::Normal ; "lower bound")]
    #[test_case(100.0 => StatusTier::Normal ; "upper bound")]
    #[test_case(101.0 => StatusTier::Alert ; "tachycardia")]
    fn heart_rate_tiers(bpm: f64) -> StatusTier {
        evaluate(VitalKind::HeartRate, bpm, None)
    }

    #[test]
    fn pulse_rate_uses_heart_rate_thresholds() {
        assert_eq!(evaluate(VitalKind::PulseRate, 45.0, None), StatusTier::Alert);
        assert_eq!(evaluate(VitalKind::PulseRate, 72.0, None), StatusTier::Normal);
    }

    #[test_case(91.9 => StatusTier::Critical ; "severe hypoxemia")]
    #[test_case(92.0 => StatusTier::Alert ; "mild boundary")]
    #[test_case(94.9 => StatusTier::Alert ; "just below normal")]
    #[test_case(95.0 => StatusTier::Normal ; "normal boundary")]
    #[test_case(99.0 => StatusTier::Normal ; "healthy")]
    fn oxygen_saturation_tiers(spo2: f64) -> StatusTier {
        evaluate(VitalKind::OxygenSaturation, spo2, None)
    }

    // Exhaustive boundary sweep for temperature.
    #[test_case(34.9 => StatusTier::Alert ; "hypothermia")]
    #[test_case(35.0 => StatusTier::Normal ; "lower bound")]
    #[test_case(37.2 => StatusTier::Normal ; "upper normal bound")]
    #[test_case(37.3 => StatusTier::Alert ; "low-grade fever")]
    #[test_case(37.9 => StatusTier::Alert ; "just below critical")]
    #[test_case(38.0 => StatusTier::Critical ; "fever boundary")]
    #[test_case(38.1 => StatusTier::Critical ; "fever")]
    fn temperature_tiers(celsius: f64) -> StatusTier {
        evaluate(VitalKind::Temperature, celsius, None)
    }

    #[test]
    fn weight_has_no_thresholds() {
        assert_eq!(evaluate(VitalKind::Weight, 250.0, None), StatusTier::Normal);
        assert_eq!(evaluate(VitalKind::Weight, 2.0, None), StatusTier::Normal);
    }

    #[test]
    fn non_finite_primary_is_normal_for_every_kind() {
        for kind in [
            VitalKind::BloodPressure,
            VitalKind::HeartRate,
            VitalKind::PulseRate,
            VitalKind::BloodSugar,
            VitalKind::Temperature,
            VitalKind::OxygenSaturation,
            VitalKind::RespirationRate,
            VitalKind::Weight,
        ] {
            assert_eq!(evaluate(kind, f64::NAN, Some(80.0)), StatusTier::Normal);
            assert_eq!(evaluate(kind, f64::INFINITY, Some(80.0)), StatusTier::Normal);
        }
    }

    #[test]
    fn tier_display() {
        assert_eq!(StatusTier::Critical.to_string(), "critical");
        assert_eq!(
            serde_json::to_string(&StatusTier::Alert).unwrap(),
            "\"alert\""
        );
    }
}
