//! History export formatting
//!
//! Fixed-shape CSV and JSON renderings of a history sequence. Writing the
//! result to disk or a share sheet is the caller's concern; this module
//! only produces the bytes.

use crate::domain::record::VitalRecord;
use crate::domain::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// The fixed CSV column set, in order
const CSV_HEADER: &str =
    "Date,BP-Systolic,BP-Diastolic,Heart Rate,Temperature,Oxygen Saturation,Blood Sugar,Weight,Source";

/// JSON export wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VitalsExport<'a> {
    export_date: String,
    total_records: usize,
    vitals: &'a [VitalRecord],
}

/// Renders history entries as CSV
///
/// Nine fixed columns, every value double-quoted, missing fields as empty
/// strings. The blood-sugar column carries the fasting value.
pub fn to_csv(records: &[VitalRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for record in records {
        let row = [
            record.date.to_rfc3339_opts(SecondsFormat::Secs, true),
            opt_int(record.blood_pressure_systolic),
            opt_int(record.blood_pressure_diastolic),
            opt_int(record.heart_rate),
            record
                .temperature
                .map(|t| format!("{t:.1}"))
                .unwrap_or_default(),
            opt_int(record.oxygen_saturation),
            opt_int(record.blood_sugar_fasting),
            record.weight.map(|w| format!("{w:.1}")).unwrap_or_default(),
            record.source.to_string(),
        ];

        let quoted: Vec<String> = row.iter().map(|value| quote_csv(value)).collect();
        out.push_str(&quoted.join(","));
        out.push('\n');
    }

    out
}

/// Renders history entries as the JSON export wrapper
///
/// Shape: `{ "exportDate", "totalRecords", "vitals": [...] }` with records
/// in the order supplied.
pub fn to_json(records: &[VitalRecord]) -> Result<String> {
    let export = VitalsExport {
        export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        total_records: records.len(),
        vitals: records,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

fn opt_int(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Double-quotes a CSV value, escaping embedded quotes
fn quote_csv(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, VitalSource};
    use chrono::TimeZone;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn test_csv_header_is_fixed() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv.lines().next().unwrap(),
            "Date,BP-Systolic,BP-Diastolic,Heart Rate,Temperature,Oxygen Saturation,Blood Sugar,Weight,Source"
        );
    }

    #[test]
    fn test_csv_row_quoting_and_missing_fields() {
        let date = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let record = VitalRecord::builder(user())
            .date(date)
            .blood_pressure(120, 80)
            .weight(70.25)
            .build();

        let csv = to_csv(&[record]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"2025-03-14T09:30:00Z\",\"120\",\"80\",\"\",\"\",\"\",\"\",\"70.2\",\"manual\""
        );
    }

    #[test]
    fn test_csv_has_one_row_per_record() {
        let records: Vec<VitalRecord> = (0..3)
            .map(|i| VitalRecord::builder(user()).heart_rate(60 + i).build())
            .collect();
        let csv = to_csv(&records);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_json_wrapper_shape() {
        let record = VitalRecord::builder(user())
            .source(VitalSource::Device)
            .heart_rate(64)
            .build();

        let json = to_json(&[record]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totalRecords"], 1);
        assert!(value["exportDate"].is_string());
        assert_eq!(value["vitals"][0]["heartRate"], 64);
        assert_eq!(value["vitals"][0]["source"], "device");
    }

    #[test]
    fn test_json_empty_history() {
        let json = to_json(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalRecords"], 0);
        assert_eq!(value["vitals"].as_array().unwrap().len(), 0);
    }
}
