//! Command implementations

pub mod account;
pub mod dashboard;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod insights;
pub mod record;
pub mod reset;
pub mod validate;

use crate::adapters::store::{create_store, VitalsStore};
use crate::config::VitalisConfig;
use crate::core::VitalsService;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Exit code for configuration problems
pub(crate) const EXIT_CONFIG: i32 = 2;
/// Exit code for validation and format problems
pub(crate) const EXIT_VALIDATION: i32 = 3;
/// Exit code for store or network connection problems
pub(crate) const EXIT_CONNECTION: i32 = 4;
/// Exit code for unexpected failures
pub(crate) const EXIT_FATAL: i32 = 5;

/// Builds the service over the configured store backend
///
/// Provisions the backing containers before handing the service out, so
/// commands never race a half-created database.
pub(crate) async fn connect_service(config: &VitalisConfig) -> crate::domain::Result<VitalsService> {
    let store = create_store(config)?;
    store.ensure_containers().await?;
    Ok(VitalsService::new(store))
}

/// Parses a CLI date argument
///
/// Accepts a full RFC 3339 instant or a plain `YYYY-MM-DD` day. A bare day
/// maps to its first instant; pass `end_of_day` to map to its last, so a
/// `--start`/`--end` pair of bare days covers both days inclusively.
pub(crate) fn parse_cli_date(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let day: NaiveDate = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not an RFC 3339 instant or YYYY-MM-DD date"))?;

    let time = if end_of_day {
        day.and_hms_opt(23, 59, 59).expect("valid time")
    } else {
        day.and_hms_opt(0, 0, 0).expect("valid time")
    };
    Ok(Utc.from_utc_datetime(&time))
}

/// Status icon for dashboard and record output
pub(crate) fn status_icon(status: crate::core::StatusTier) -> &'static str {
    match status {
        crate::core::StatusTier::Normal => "🟢",
        crate::core::StatusTier::Alert => "🟡",
        crate::core::StatusTier::Critical => "🔴",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_instant() {
        let parsed = parse_cli_date("2025-03-14T09:30:00Z", false).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_day_start_and_end() {
        let start = parse_cli_date("2025-03-14", false).unwrap();
        let end = parse_cli_date("2025-03-14", true).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_cli_date("yesterday", false).is_err());
    }
}
