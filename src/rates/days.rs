//! Whole-day spans between calendar dates

use chrono::NaiveDate;

/// Minimum day-span used by every rate conversion
pub const MIN_DAY_SPAN: u32 = 1;

/// Number of whole days from `purchase` to `maturity`, never less than one
///
/// Both arguments are calendar dates, so the difference carries no timezone
/// or daylight-saving drift. Same-day and past maturities clamp to one day.
pub fn day_span(purchase: NaiveDate, maturity: NaiveDate) -> u32 {
    let days = maturity.signed_duration_since(purchase).num_days();
    if days < i64::from(MIN_DAY_SPAN) {
        MIN_DAY_SPAN
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span_across_months() {
        assert_eq!(day_span(ymd(2026, 1, 1), ymd(2026, 4, 30)), 119);
        assert_eq!(day_span(ymd(2026, 1, 1), ymd(2026, 1, 31)), 30);
    }

    #[test]
    fn test_span_across_leap_day() {
        assert_eq!(day_span(ymd(2028, 2, 1), ymd(2028, 3, 1)), 29);
        assert_eq!(day_span(ymd(2027, 2, 1), ymd(2027, 3, 1)), 28);
    }

    #[test]
    fn test_span_across_dst_transition_dates() {
        // Calendar dates only: no hour is gained or lost
        assert_eq!(day_span(ymd(2026, 3, 28), ymd(2026, 3, 30)), 2);
        assert_eq!(day_span(ymd(2026, 10, 24), ymd(2026, 10, 26)), 2);
    }

    #[test]
    fn test_same_or_past_maturity_clamps_to_one() {
        let purchase = ymd(2026, 6, 15);
        assert_eq!(day_span(purchase, purchase), 1);
        assert_eq!(day_span(purchase, ymd(2026, 6, 14)), 1);
        assert_eq!(day_span(purchase, ymd(2020, 1, 1)), 1);
    }
}
