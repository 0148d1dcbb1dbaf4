//! Time-log duration and billing derivation.
//!
//! Durations are stored in whole minutes and derived from the start/end
//! timestamps on every write, never trusted from the client. A single log
//! is capped at 24 hours so a forgotten timer cannot bill a week.

use rust_decimal::Decimal;

use crate::billing::MONEY_SCALE;
use crate::types::{Money, Timestamp};

/// Hard cap on a single log: 24 hours in minutes.
pub const MAX_DURATION_MINUTES: i32 = 1_440;

const MINUTES_PER_HOUR: i64 = 60;

/// Whole minutes between `start` and `end`, clamped to `[0, MAX_DURATION_MINUTES]`.
pub fn duration_minutes(start: Timestamp, end: Timestamp) -> i32 {
    let minutes = (end - start).num_minutes().max(0);
    minutes.min(i64::from(MAX_DURATION_MINUTES)) as i32
}

/// True when the raw span between `start` and `end` exceeds the cap.
pub fn exceeds_cap(start: Timestamp, end: Timestamp) -> bool {
    (end - start).num_minutes() > i64::from(MAX_DURATION_MINUTES)
}

/// End timestamp after applying the cap: at most `start + 24h`.
pub fn capped_end(start: Timestamp, end: Timestamp) -> Timestamp {
    if exceeds_cap(start, end) {
        start + chrono::Duration::minutes(i64::from(MAX_DURATION_MINUTES))
    } else {
        end
    }
}

/// Duration in decimal hours, rounded to two places (e.g. 90 minutes -> 1.50).
pub fn duration_hours(minutes: i32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)).round_dp(2)
}

/// Billable cost of a log: `hourly_rate * hours`, zero when not billable
/// or no rate is set.
pub fn billable_cost(minutes: i32, hourly_rate: Option<Money>, is_billable: bool) -> Money {
    match hourly_rate {
        Some(rate) if is_billable => {
            (rate * Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)).round_dp(MONEY_SCALE)
        }
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(h: u32, m: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 5, h, m, 0).unwrap()
    }

    #[test]
    fn test_duration_from_span() {
        assert_eq!(duration_minutes(ts(9, 0), ts(10, 30)), 90);
        assert_eq!(duration_minutes(ts(9, 0), ts(9, 0)), 0);
    }

    #[test]
    fn test_negative_span_clamps_to_zero() {
        assert_eq!(duration_minutes(ts(10, 0), ts(9, 0)), 0);
    }

    #[test]
    fn test_cap_at_24_hours() {
        let start = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 8, 9, 0, 0).unwrap();

        assert!(exceeds_cap(start, end));
        assert_eq!(duration_minutes(start, end), MAX_DURATION_MINUTES);
        assert_eq!(
            capped_end(start, end),
            start + chrono::Duration::hours(24),
            "capped end lands exactly 24h after start"
        );

        // Within the cap the end passes through untouched.
        let short_end = start + chrono::Duration::hours(3);
        assert_eq!(capped_end(start, short_end), short_end);
    }

    #[test]
    fn test_duration_hours_rounding() {
        assert_eq!(duration_hours(90), Decimal::new(150, 2));
        assert_eq!(duration_hours(50), Decimal::new(83, 2)); // 0.8333.. -> 0.83
    }

    #[test]
    fn test_billable_cost() {
        let rate = Decimal::from(75);
        assert_eq!(billable_cost(90, Some(rate), true), Decimal::new(11_250, 2));
        assert_eq!(billable_cost(90, Some(rate), false), Decimal::ZERO);
        assert_eq!(billable_cost(90, None, true), Decimal::ZERO);
    }
}
