//! Document extraction adapter
//!
//! Sends an image or PDF to the vision model with a fixed instruction
//! prompt and turns the response into a partial [`VitalRecord`]. The model
//! is asked for strictly vital-sign fields as a flat JSON object; the
//! response is fence-stripped, parsed and cleaned field by field.
//!
//! A document with no vital signs in it (a lab report, say) is a normal
//! outcome: the adapter returns `Ok(None)`, never an error.

use crate::adapters::ai::{GenerativeModel, InlineDocument};
use crate::domain::{Result, UserId, VitalError, VitalRecord, VitalSource};
use std::sync::Arc;

/// Instruction prompt for the vision model
///
/// Field names match the record's document shape so the cleaned object
/// maps straight onto it.
const EXTRACTION_PROMPT: &str = "\
You are reading a photo or scan of a medical document. Extract ONLY vital-sign \
measurements and return them as a single flat JSON object with no surrounding text. \
Allowed keys: bloodPressureSystolic, bloodPressureDiastolic (mmHg), bloodSugarFasting, \
bloodSugarPostMeal (mg/dL), heartRate, pulseRate (bpm), temperature (Celsius), \
oxygenSaturation (percent), respirationRate (breaths per minute), weight (kg), \
height (cm), bmi, notes (short free text). Use numbers for measurements. Omit any \
key the document does not contain. Do NOT include laboratory results, imaging \
reports, medication lists or diagnoses. If the document contains no vital signs, \
return an empty JSON object {}.";

/// Extraction adapter over the generative-model seam
pub struct DocumentExtractor {
    model: Arc<dyn GenerativeModel>,
}

impl DocumentExtractor {
    /// Create an extractor over a model implementation
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Extract vital signs from a document
    ///
    /// Returns `Ok(None)` when the cleaned response contains no usable
    /// fields ("no vitals found"). Transport failures surface as
    /// [`crate::domain::AiError`]; a response that isn't valid JSON after
    /// fence stripping surfaces as [`VitalError::ExtractionFormat`] so the
    /// caller can suggest retaking the photo rather than checking the
    /// connection.
    pub async fn extract(
        &self,
        user_id: UserId,
        data: &[u8],
        mime_type: &str,
    ) -> Result<Option<VitalRecord>> {
        let attachment = InlineDocument {
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
        };

        let raw = self
            .model
            .generate(EXTRACTION_PROMPT, Some(&attachment))
            .await?;

        tracing::debug!(response_len = raw.len(), "Received extraction response");

        clean_response(&raw, user_id)
    }
}

/// Parses and cleans a raw model response into a partial record
fn clean_response(raw: &str, user_id: UserId) -> Result<Option<VitalRecord>> {
    let stripped = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(&stripped).map_err(|e| {
        VitalError::ExtractionFormat(format!("Response is not valid JSON: {e}"))
    })?;

    let object = value.as_object().ok_or_else(|| {
        VitalError::ExtractionFormat("Response is not a JSON object".to_string())
    })?;

    let int_field = |key: &str| -> Option<u32> {
        object
            .get(key)
            .and_then(clean_numeric)
            .map(|v| v.round() as u32)
    };
    let decimal_field = |key: &str| -> Option<f64> { object.get(key).and_then(clean_numeric) };

    let mut builder = VitalRecord::builder(user_id).source(VitalSource::Imported);
    let mut populated = 0usize;

    if let Some(v) = int_field("bloodPressureSystolic") {
        builder = builder.systolic(v);
        populated += 1;
    }
    if let Some(v) = int_field("bloodPressureDiastolic") {
        builder = builder.diastolic(v);
        populated += 1;
    }
    if let Some(v) = int_field("bloodSugarFasting") {
        builder = builder.blood_sugar_fasting(v);
        populated += 1;
    }
    if let Some(v) = int_field("bloodSugarPostMeal") {
        builder = builder.blood_sugar_post_meal(v);
        populated += 1;
    }
    if let Some(v) = int_field("heartRate") {
        builder = builder.heart_rate(v);
        populated += 1;
    }
    if let Some(v) = int_field("pulseRate") {
        builder = builder.pulse_rate(v);
        populated += 1;
    }
    if let Some(v) = int_field("oxygenSaturation") {
        builder = builder.oxygen_saturation(v);
        populated += 1;
    }
    if let Some(v) = int_field("respirationRate") {
        builder = builder.respiration_rate(v);
        populated += 1;
    }
    if let Some(v) = decimal_field("temperature") {
        builder = builder.temperature(v);
        populated += 1;
    }
    if let Some(v) = decimal_field("weight") {
        builder = builder.weight(v);
        populated += 1;
    }
    if let Some(v) = decimal_field("height") {
        builder = builder.height(v);
        populated += 1;
    }
    if let Some(v) = decimal_field("bmi") {
        builder = builder.bmi(v);
        populated += 1;
    }

    // Notes are kept verbatim, but only if they arrive as a string.
    if let Some(notes) = object.get("notes").and_then(|v| v.as_str()) {
        builder = builder.notes(notes);
        populated += 1;
    }

    if populated == 0 {
        tracing::info!("No vital signs found in document");
        return Ok(None);
    }

    Ok(Some(builder.build()))
}

/// Strips markdown code-fence wrapping from a raw response
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Keeps a numeric value only if it is finite and strictly positive
///
/// Strings are coerced via parse and re-validated under the same rule;
/// every other shape is dropped.
fn clean_numeric(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    if number.is_finite() && number > 0.0 {
        Some(number)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn test_string_numeric_coerced_and_negative_dropped() {
        let raw = r#"{"heartRate": "72", "oxygenSaturation": -5, "notes": "ok"}"#;
        let record = clean_response(raw, user()).unwrap().unwrap();
        assert_eq!(record.heart_rate, Some(72));
        assert_eq!(record.oxygen_saturation, None);
        assert_eq!(record.notes, Some("ok".to_string()));
        assert_eq!(record.source, VitalSource::Imported);
    }

    #[test]
    fn test_fenced_response_is_stripped() {
        let raw = "```json\n{\"temperature\": 37.8}\n```";
        let record = clean_response(raw, user()).unwrap().unwrap();
        assert_eq!(record.temperature, Some(37.8));
    }

    #[test]
    fn test_empty_object_means_no_vitals_found() {
        assert!(clean_response("{}", user()).unwrap().is_none());
        assert!(clean_response("```json\n{}\n```", user()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_a_format_error() {
        let err = clean_response("the patient is fine", user()).unwrap_err();
        assert!(matches!(err, VitalError::ExtractionFormat(_)));
    }

    #[test]
    fn test_non_object_json_is_a_format_error() {
        let err = clean_response("[1, 2, 3]", user()).unwrap_err();
        assert!(matches!(err, VitalError::ExtractionFormat(_)));
    }

    #[test]
    fn test_unexpected_shapes_are_dropped_silently() {
        let raw = r#"{
            "heartRate": {"value": 72},
            "temperature": true,
            "notes": 42,
            "weight": "68.5"
        }"#;
        let record = clean_response(raw, user()).unwrap().unwrap();
        assert_eq!(record.heart_rate, None);
        assert_eq!(record.temperature, None);
        assert_eq!(record.notes, None);
        assert_eq!(record.weight, Some(68.5));
    }

    #[test]
    fn test_zero_and_non_finite_values_dropped() {
        let raw = r#"{"heartRate": 0, "weight": "NaN", "temperature": 36.9}"#;
        let record = clean_response(raw, user()).unwrap().unwrap();
        assert_eq!(record.heart_rate, None);
        assert_eq!(record.weight, None);
        assert_eq!(record.temperature, Some(36.9));
    }

    #[test]
    fn test_blood_pressure_pair_extraction() {
        let raw = r#"{"bloodPressureSystolic": 150, "bloodPressureDiastolic": 95}"#;
        let record = clean_response(raw, user()).unwrap().unwrap();
        assert_eq!(record.blood_pressure_systolic, Some(150));
        assert_eq!(record.blood_pressure_diastolic, Some(95));
    }
}
