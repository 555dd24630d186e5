//! Timezone-interpretation correction for rule-generated occurrences.
//!
//! The rule evaluator works on naive date-times: an occurrence's wall-clock
//! fields carry no zone. When the event anchor declared a named zone, the
//! reading must be reinterpreted as belonging to that zone rather than UTC.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Reinterpret a naive occurrence as a wall-clock reading in `tzid`.
///
/// Returns the instant whose reading in `tzid` matches the evaluator's raw
/// output: the naive-as-UTC instant shifted by the zone's offset for those
/// wall-clock fields. An unknown zone leaves the naive-as-UTC reading in
/// place.
pub fn correct_occurrence(naive: NaiveDateTime, tzid: &str) -> DateTime<Utc> {
    let as_utc = naive.and_utc();
    match tzid.parse::<Tz>() {
        Ok(zone) => as_utc - Duration::minutes(zone_offset_minutes(zone, naive)),
        Err(_) => {
            tracing::warn!(tzid, "unknown timezone on event start, leaving occurrence uncorrected");
            as_utc
        }
    }
}

/// Offset from UTC, in minutes, of `naive` read as a wall clock in `zone`.
fn zone_offset_minutes(zone: Tz, naive: NaiveDateTime) -> i64 {
    let seconds = match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.offset().fix().local_minus_utc(),
        // DST fold: the reading occurs twice, take the earlier offset
        LocalResult::Ambiguous(first, _) => first.offset().fix().local_minus_utc(),
        // DST gap: no such reading, use the offset in force at that instant
        LocalResult::None => zone.offset_from_utc_datetime(&naive).fix().local_minus_utc(),
    };
    i64::from(seconds) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn fixed_offset_zone_shifts_by_its_offset() {
        // Etc/GMT-2 is UTC+2: a 10:00 wall clock reads as 08:00 UTC
        let corrected = correct_occurrence(naive(2026, 8, 10, 10, 0), "Etc/GMT-2");
        assert_eq!(corrected, Utc.with_ymd_and_hms(2026, 8, 10, 8, 0, 0).unwrap());
    }

    #[test]
    fn wall_clock_reading_is_preserved_in_the_zone() {
        let zone: Tz = "America/New_York".parse().unwrap();
        let corrected = correct_occurrence(naive(2026, 1, 15, 9, 30), "America/New_York");
        assert_eq!(
            corrected.with_timezone(&zone).naive_local(),
            naive(2026, 1, 15, 9, 30)
        );
        // EST is UTC-5 in January
        assert_eq!(corrected, Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 0).unwrap());
    }

    #[test]
    fn dst_summer_offset_differs_from_winter() {
        // EDT is UTC-4 in July
        let corrected = correct_occurrence(naive(2026, 7, 15, 9, 30), "America/New_York");
        assert_eq!(corrected, Utc.with_ymd_and_hms(2026, 7, 15, 13, 30, 0).unwrap());
    }

    #[test]
    fn dst_fold_takes_the_earlier_offset() {
        // 2026-11-01 01:30 occurs twice in New York; the earlier reading is EDT (UTC-4)
        let corrected = correct_occurrence(naive(2026, 11, 1, 1, 30), "America/New_York");
        assert_eq!(corrected, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
    }

    #[test]
    fn unknown_zone_leaves_the_utc_reading() {
        let corrected = correct_occurrence(naive(2026, 8, 10, 10, 0), "Not/AZone");
        assert_eq!(corrected, Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap());
    }
}
