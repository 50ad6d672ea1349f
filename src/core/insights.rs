//! Narrative insights
//!
//! Summarizes recent history into a plain-text prompt and asks the
//! generative model for a short narrative. The response is prose, passed
//! through untouched; there is no wire schema to validate on this path.

use crate::adapters::ai::GenerativeModel;
use crate::core::dashboard::build_dashboard;
use crate::domain::record::VitalRecord;
use crate::domain::{Result, VitalError};

const INSIGHTS_PREAMBLE: &str = "\
You are a wellness assistant summarizing a user's recent vital-sign readings. \
Write a short, encouraging narrative (3-5 sentences) in plain prose: point out \
trends, flag readings outside their normal ranges gently, and suggest discussing \
persistent deviations with a clinician. Do not give medical advice, diagnoses or \
medication guidance. Do not use markdown, lists or JSON.";

/// Generates a narrative insight over recent history
///
/// The newest entry doubles as the "current" snapshot for status context.
///
/// # Errors
///
/// Fails with a validation error when there is no history to summarize,
/// or with the model's transport error.
pub async fn narrative(
    model: &dyn GenerativeModel,
    history: &[VitalRecord],
) -> Result<String> {
    if history.is_empty() {
        return Err(VitalError::Validation(
            "No recorded vitals to summarize".to_string(),
        ));
    }

    let prompt = build_prompt(history);
    tracing::debug!(entries = history.len(), "Requesting narrative insight");

    model.generate(&prompt, None).await
}

/// Renders history into the prompt's reading list
fn build_prompt(history: &[VitalRecord]) -> String {
    let mut prompt = String::from(INSIGHTS_PREAMBLE);
    prompt.push_str("\n\nCurrent readings with status:\n");

    for card in build_dashboard(&history[0]) {
        prompt.push_str(&format!(
            "- {}: {} {} ({})\n",
            card.label, card.value, card.unit, card.status
        ));
    }

    prompt.push_str("\nRecent history, newest first:\n");
    for record in history {
        prompt.push_str(&format!("- {}\n", summarize_entry(record)));
    }

    prompt
}

fn summarize_entry(record: &VitalRecord) -> String {
    let mut parts = Vec::new();

    if let (Some(s), Some(d)) = (
        record.blood_pressure_systolic,
        record.blood_pressure_diastolic,
    ) {
        parts.push(format!("BP {s}/{d} mmHg"));
    }
    if let Some(hr) = record.heart_rate {
        parts.push(format!("HR {hr} bpm"));
    }
    if let Some(sugar) = record.blood_sugar_fasting {
        parts.push(format!("fasting sugar {sugar} mg/dL"));
    }
    if let Some(t) = record.temperature {
        parts.push(format!("temp {t:.1} C"));
    }
    if let Some(spo2) = record.oxygen_saturation {
        parts.push(format!("SpO2 {spo2}%"));
    }
    if let Some(w) = record.weight {
        parts.push(format!("weight {w:.1} kg"));
    }

    let values = if parts.is_empty() {
        "no tracked values".to_string()
    } else {
        parts.join(", ")
    };

    format!(
        "{}: {} [{}]",
        record.date.format("%Y-%m-%d %H:%M"),
        values,
        record.source
    )
}
