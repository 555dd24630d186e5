//! Day-level instances: span splitting and identity hashing.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::event::{EventStamp, DAY_MS};

/// What drove an instance's generation: a recurrence rule or the event's
/// direct occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Recurring,
    Single,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Recurring => f.write_str("recurring"),
            SourceKind::Single => f.write_str("single"),
        }
    }
}

/// One rendered calendar entry: a single day of a single occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventInstance {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Carried from the owning feed's configuration, not the event.
    pub color: String,
    pub is_completed: bool,
    /// The event's location, when any.
    pub additional: Option<String>,
    /// Declared type of the owning feed, also from its configuration.
    pub source_type: String,
    pub kind: SourceKind,
}

/// Number of calendar days an event covers.
///
/// A sentinel end means a single day. Partial days truncate — a 36-hour
/// span covers one day; identity hashing depends on the integer day index,
/// so no rounding is applied. A sub-day explicit end still covers its day.
pub fn span_days(start: &EventStamp, end: &EventStamp) -> i64 {
    if end.is_sentinel() {
        1
    } else {
        ((end.value - start.value) / DAY_MS).max(1)
    }
}

/// The dates covered by an occurrence, one per day of its span.
pub fn split_span(
    occurrence: DateTime<Utc>,
    days: i64,
) -> impl Iterator<Item = (i64, DateTime<Utc>)> {
    (0..days).map(move |day| (day, occurrence + Duration::days(day)))
}

/// Deterministic identity for one day-instance.
///
/// Upstream UIDs are not stable across refreshes; two instances are the
/// same entry exactly when start, end, title, occurrence index, day offset
/// and source kind all match. The key is a 31-multiplier polynomial fold of
/// the concatenated fields over UTF-16 code units, with 32-bit signed
/// wraparound at each step, rendered as lowercase base-36.
pub fn instance_id(
    start: &EventStamp,
    end: &EventStamp,
    title: &str,
    index: usize,
    day_offset: i64,
    kind: SourceKind,
) -> String {
    let seed = format!(
        "{}{}{}{}{}{}",
        start.value, end.value, title, index, day_offset, kind
    );
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    base36(hash as u32)
}

fn base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}
