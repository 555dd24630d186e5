//! Request window validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The `[start, end]` interval for which occurrences are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RequestWindow {
    /// Build a window from two ISO-8601 strings.
    ///
    /// Accepts full RFC 3339 timestamps and bare dates (`2026-08-01`, read
    /// as midnight UTC). Unparseable or unordered input yields `None`: a
    /// degenerate request, not a fault — callers short-circuit to no output
    /// without surfacing an error.
    pub fn from_iso(start: &str, end: &str) -> Option<Self> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        (start <= end).then_some(RequestWindow { start, end })
    }
}

fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_an_ordered_iso_pair() {
        let window = RequestWindow::from_iso("2026-08-01T00:00:00Z", "2026-08-31T00:00:00Z")
            .expect("valid window");
        assert!(window.start < window.end);
    }

    #[test]
    fn equal_bounds_are_a_valid_window() {
        assert!(RequestWindow::from_iso("2026-08-01T00:00:00Z", "2026-08-01T00:00:00Z").is_some());
    }

    #[test]
    fn unordered_bounds_yield_no_window() {
        assert!(RequestWindow::from_iso("2026-08-31T00:00:00Z", "2026-08-01T00:00:00Z").is_none());
    }

    #[test]
    fn date_only_input_reads_as_midnight_utc() {
        let window =
            RequestWindow::from_iso("2026-08-01", "2026-08-31").expect("valid window");
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 8, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn unparseable_input_yields_no_window() {
        assert!(RequestWindow::from_iso("not-a-date", "2026-08-01T00:00:00Z").is_none());
        assert!(RequestWindow::from_iso("2026-08-01T00:00:00Z", "").is_none());
    }

    #[test]
    fn offset_input_normalizes_to_utc() {
        let window = RequestWindow::from_iso("2026-08-01T02:00:00+02:00", "2026-08-02T00:00:00Z")
            .expect("valid window");
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }
}
