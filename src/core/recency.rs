//! Relative-time formatting for measurement timestamps
//!
//! Converts "how long ago was this taken" into the short strings shown on
//! dashboard cards. Pure: the clock is an explicit input in
//! [`time_since_at`], and [`time_since`] just binds it to `Utc::now()`.

use chrono::{DateTime, Utc};

/// Bucket sizes in seconds, largest first
const BUCKETS: [(i64, &str); 5] = [
    (31_536_000, "years"),
    (2_592_000, "months"),
    (86_400, "days"),
    (3_600, "hours"),
    (60, "minutes"),
];

/// Formats the elapsed time since `past` relative to the current instant
pub fn time_since(past: DateTime<Utc>) -> String {
    time_since_at(past, Utc::now())
}

/// Formats the elapsed time between `past` and an explicit `now`
///
/// The first bucket whose quotient strictly exceeds 1 wins, floored and
/// suffixed with the unit and "ago". Anything under two minutes old (and
/// any instant not in the past) renders as "Just now".
pub fn time_since_at(past: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - past).num_seconds();

    for (size, unit) in BUCKETS {
        let quotient = elapsed as f64 / size as f64;
        if quotient > 1.0 {
            return format!("{} {} ago", quotient.floor() as i64, unit);
        }
    }

    "Just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_just_now_under_two_minutes() {
        assert_eq!(time_since_at(now(), now()), "Just now");
        assert_eq!(time_since_at(now() - Duration::seconds(59), now()), "Just now");
        // 90 seconds is 1.5 minutes; the quotient exceeds 1 so it buckets.
        assert_eq!(
            time_since_at(now() - Duration::seconds(90), now()),
            "1 minutes ago"
        );
        assert_eq!(time_since_at(now() - Duration::seconds(60), now()), "Just now");
    }

    #[test]
    fn test_minutes_bucket() {
        assert_eq!(
            time_since_at(now() - Duration::minutes(5), now()),
            "5 minutes ago"
        );
    }

    #[test]
    fn test_hours_bucket() {
        assert_eq!(
            time_since_at(now() - Duration::hours(3), now()),
            "3 hours ago"
        );
        // Exactly one hour does not exceed the hour bucket; falls to minutes.
        assert_eq!(
            time_since_at(now() - Duration::hours(1), now()),
            "60 minutes ago"
        );
    }

    #[test]
    fn test_days_months_years_buckets() {
        assert_eq!(time_since_at(now() - Duration::days(4), now()), "4 days ago");
        assert_eq!(
            time_since_at(now() - Duration::days(62), now()),
            "2 months ago"
        );
        assert_eq!(
            time_since_at(now() - Duration::days(800), now()),
            "2 years ago"
        );
    }

    #[test]
    fn test_future_instant_renders_just_now() {
        assert_eq!(
            time_since_at(now() + Duration::hours(2), now()),
            "Just now"
        );
    }

    #[test]
    fn test_monotonic_bucket_order() {
        // Older instants never produce a finer bucket than newer ones.
        let offsets = [
            Duration::seconds(30),
            Duration::minutes(10),
            Duration::hours(5),
            Duration::days(3),
            Duration::days(90),
            Duration::days(1000),
        ];
        fn bucket_rank(s: &str) -> usize {
            if s == "Just now" {
                0
            } else if s.contains("minutes") {
                1
            } else if s.contains("hours") {
                2
            } else if s.contains("days") {
                3
            } else if s.contains("months") {
                4
            } else {
                5
            }
        }
        let mut last = 0;
        for offset in offsets {
            let rank = bucket_rank(&time_since_at(now() - offset, now()));
            assert!(rank >= last, "bucket order regressed at offset {offset}");
            last = rank;
        }
    }
}
