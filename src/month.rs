//! Calendar-month labels used by the analytics views.
//!
//! Month membership throughout the app is a textual prefix match on the
//! stored date string, so months are handled as plain "YYYY-MM" labels
//! rather than `time` types. A transaction belongs to a month if and only
//! if its date string starts with the month's label, which means a
//! malformed date (e.g. "03/05/2024") belongs to no month at all.

use time::{Date, Duration};

/// The number of entries in the trend series.
pub const TREND_MONTHS: i64 = 6;

/// Format `date` as a "YYYY-MM" month label.
pub fn month_label(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// The month labels for the trend series, most recent first.
///
/// Each step back is a fixed 30-day stride rather than true calendar-month
/// subtraction, so the labels can repeat a long month or skip a short one
/// depending on the day of invocation. Clients chart the series as-is and
/// rely on the stride, so it must not be replaced with calendar arithmetic.
pub fn trailing_month_labels(today: Date) -> Vec<String> {
    (0..TREND_MONTHS)
        .map(|months_back| month_label(today - Duration::days(30 * months_back)))
        .collect()
}

#[cfg(test)]
mod month_tests {
    use time::macros::date;

    use super::{TREND_MONTHS, month_label, trailing_month_labels};

    #[test]
    fn label_is_zero_padded() {
        assert_eq!(month_label(date!(2024 - 03 - 05)), "2024-03");
        assert_eq!(month_label(date!(987 - 11 - 30)), "0987-11");
    }

    #[test]
    fn trailing_labels_are_most_recent_first() {
        let labels = trailing_month_labels(date!(2024 - 07 - 15));

        assert_eq!(
            labels,
            vec![
                "2024-07", "2024-06", "2024-05", "2024-04", "2024-03", "2024-02"
            ]
        );
    }

    #[test]
    fn trailing_labels_always_have_six_entries() {
        let labels = trailing_month_labels(date!(2024 - 01 - 01));

        assert_eq!(labels.len(), TREND_MONTHS as usize);
    }

    #[test]
    fn stride_can_skip_short_months() {
        // 30 days before 2025-03-01 is 2025-01-30, so February never
        // appears in the series.
        let labels = trailing_month_labels(date!(2025 - 03 - 01));

        assert_eq!(labels[0], "2025-03");
        assert_eq!(labels[1], "2025-01");
    }
}
