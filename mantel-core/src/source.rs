//! Adapter from the `icalendar` crate's parser output to feed events.
//!
//! Document lexing is the parser crate's job; this module only reshapes its
//! output into [`CalendarEvent`] records for expansion.

use chrono::{LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    parser::{read_calendar, unfold, Component},
    CalendarDateTime, DatePerhapsTime,
};

use crate::event::{CalendarEvent, EventStamp, RecurrenceRule};
use crate::feed::ParsedFeed;

/// Parse raw ICS text into a feed document.
///
/// A document the parser rejects yields `parse_succeeded = false`; VEVENTs
/// missing a usable DTSTART are skipped individually.
pub fn parse_feed(content: &str) -> ParsedFeed {
    let unfolded = unfold(content);
    let calendar = match read_calendar(&unfolded) {
        Ok(calendar) => calendar,
        Err(err) => {
            tracing::warn!(%err, "calendar document failed to parse");
            return ParsedFeed {
                events: Vec::new(),
                parse_succeeded: false,
            };
        }
    };

    let events = calendar
        .components
        .iter()
        .filter(|component| component.name == "VEVENT")
        .filter_map(to_calendar_event)
        .collect();

    ParsedFeed {
        events,
        parse_succeeded: true,
    }
}

fn to_calendar_event(vevent: &Component) -> Option<CalendarEvent> {
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start_prop = vevent.find_prop("DTSTART")?;
    let start = to_stamp(DatePerhapsTime::try_from(start_prop).ok()?)?;

    // DTEND is absent for all-day events; the zero sentinel means "no end"
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .and_then(to_stamp)
        .unwrap_or_else(EventStamp::none);

    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    let rules: Vec<String> = vevent
        .properties
        .iter()
        .filter(|p| p.name == "RRULE")
        .map(|p| p.val.to_string())
        .collect();

    let start_instant = start.to_utc()?;
    let recurrence = match rules.len() {
        0 => None,
        1 => Some(RecurrenceRule::Rule {
            options: rules.into_iter().next()?,
            anchor: Some(start_instant),
        }),
        _ => Some(RecurrenceRule::RuleSet { rules }),
    };

    Some(CalendarEvent {
        title,
        start,
        end,
        location,
        recurrence,
        // The plain occurrence list: a non-recurring event happens at its start
        direct_occurrences: vec![start_instant],
    })
}

/// Map the parser's date value to an epoch-millisecond stamp, keeping the
/// declared zone name for later reinterpretation.
fn to_stamp(value: DatePerhapsTime) -> Option<EventStamp> {
    match value {
        DatePerhapsTime::Date(date) => Some(EventStamp::at(
            date.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
        )),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => {
            Some(EventStamp::at(dt.timestamp_millis()))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            Some(EventStamp::at(naive.and_utc().timestamp_millis()))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let value = match tzid.parse::<Tz>() {
                Ok(zone) => match zone.from_local_datetime(&date_time) {
                    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                        dt.with_timezone(&Utc).timestamp_millis()
                    }
                    LocalResult::None => date_time.and_utc().timestamp_millis(),
                },
                Err(_) => date_time.and_utc().timestamp_millis(),
            };
            Some(EventStamp {
                value,
                tzid: Some(tzid),
            })
        }
    }
}
