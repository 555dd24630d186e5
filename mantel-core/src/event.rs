//! Feed-neutral calendar event types.
//!
//! The document parser (an external collaborator, see [`crate::source`])
//! produces these records; expansion, splitting and identity hashing work
//! exclusively with them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one calendar day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A point in time as the feed declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStamp {
    /// Milliseconds since the Unix epoch. `0` on an end stamp means
    /// "no explicit end" (all-day, single-day).
    pub value: i64,
    /// Named IANA zone the wall-clock fields belong to, when the feed
    /// declared one (`DTSTART;TZID=...`).
    pub tzid: Option<String>,
}

impl EventStamp {
    pub fn at(value: i64) -> Self {
        EventStamp { value, tzid: None }
    }

    /// The "no explicit end" sentinel.
    pub fn none() -> Self {
        EventStamp {
            value: 0,
            tzid: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.value == 0
    }

    /// The stamp as an absolute instant.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.value)
    }
}

/// A structured recurrence description.
///
/// The duality is explicit: either a single rule carrying its own anchor,
/// or a decomposed set of rule definitions with no implicit anchor (the
/// event start anchors the first rule at resolution time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecurrenceRule {
    /// One RRULE body (e.g. `FREQ=WEEKLY;COUNT=4`) plus its anchor.
    Rule {
        options: String,
        anchor: Option<DateTime<Utc>>,
    },
    /// Underlying rule definitions of a decomposed rule set.
    RuleSet { rules: Vec<String> },
}

/// A calendar event as produced by the document parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: EventStamp,
    pub end: EventStamp,
    pub location: Option<String>,
    /// Drives instance generation when present and non-empty.
    pub recurrence: Option<RecurrenceRule>,
    /// Precomputed concrete dates; used when no recurrence rule applies
    /// and as the fallback when one fails to evaluate.
    pub direct_occurrences: Vec<DateTime<Utc>>,
}
