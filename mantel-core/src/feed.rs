//! Per-feed refresh: from a parsed document to identity-keyed instances.
//!
//! One refresh runs to completion for one feed; the caller merges the
//! resulting batch into the accumulated map. A failing feed surfaces an
//! informational error and contributes nothing this round, without
//! affecting other feeds.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::FeedError;
use crate::event::CalendarEvent;
use crate::instance::{self, EventInstance};
use crate::recurrence;
use crate::window::RequestWindow;

/// Declared type of calendar feeds, stamped on every instance and used to
/// prefix surfaced errors.
pub const FEED_TYPE: &str = "ical";

/// Configuration for one calendar feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub name: String,
    /// Carried onto every instance this feed produces.
    pub color: String,
    /// Prefix instance titles with the feed name.
    pub show_name: bool,
    /// Suppress surfaced errors for this feed.
    pub hide_errors: bool,
}

/// A feed document after parsing by the external collaborator.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub events: Vec<CalendarEvent>,
    pub parse_succeeded: bool,
}

/// Result of one feed refresh: the identity-keyed batch plus an optional
/// surfaced error.
#[derive(Debug, Default)]
pub struct FeedRefresh {
    pub instances: HashMap<String, EventInstance>,
    pub error: Option<FeedError>,
}

/// Compute one feed's instances for the requested window.
///
/// `window` is `None` when the caller's window input failed validation; the
/// refresh then yields no instances and no additional error. `now` decides
/// completion and should be taken in the configured display timezone.
pub fn refresh_feed(
    feed: &FeedConfig,
    parsed: &ParsedFeed,
    window: Option<&RequestWindow>,
    now: DateTime<Utc>,
) -> FeedRefresh {
    let mut refresh = FeedRefresh::default();

    if !parsed.parse_succeeded {
        refresh.error = Some(FeedError::Parse {
            feed: feed.name.clone(),
        });
        return refresh;
    }
    if parsed.events.is_empty() {
        refresh.error = Some(FeedError::NoEvents {
            feed: feed.name.clone(),
        });
        return refresh;
    }
    let Some(window) = window else {
        // Invalid window: a degenerate request, not a fault
        return refresh;
    };

    for event in &parsed.events {
        let title = if feed.show_name {
            format!("{}: {}", feed.name, event.title)
        } else {
            event.title.clone()
        };

        let days = instance::span_days(&event.start, &event.end);
        for occurrence in recurrence::expand_event(event, window) {
            for (day_offset, date) in instance::split_span(occurrence.date, days) {
                let id = instance::instance_id(
                    &event.start,
                    &event.end,
                    &title,
                    occurrence.index,
                    day_offset,
                    occurrence.kind,
                );
                refresh.instances.insert(
                    id.clone(),
                    EventInstance {
                        id,
                        title: title.clone(),
                        date,
                        color: feed.color.clone(),
                        is_completed: date < now,
                        additional: event.location.clone(),
                        source_type: FEED_TYPE.to_string(),
                        kind: occurrence.kind,
                    },
                );
            }
        }
    }

    tracing::debug!(
        feed = %feed.name,
        instances = refresh.instances.len(),
        "feed refresh computed"
    );
    refresh
}
