//! Recurrence expansion for feed events.
//!
//! Expands one event's recurrence description into concrete occurrence
//! dates within a request window, falling back to the event's direct
//! occurrence list when no rule applies or a rule cannot be evaluated.

use chrono::{DateTime, Duration, Utc};
use rrule::RRuleSet;

use crate::error::{ExpandError, ExpandResult};
use crate::event::{CalendarEvent, RecurrenceRule};
use crate::instance::SourceKind;
use crate::timezone;
use crate::window::RequestWindow;

/// Cap on occurrences evaluated per rule within one window.
const MAX_OCCURRENCES: u16 = 365;

/// One concrete date an event happens, before day-span splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub date: DateTime<Utc>,
    /// Position within this event's expansion batch; part of instance identity.
    pub index: usize,
    pub kind: SourceKind,
}

/// Recurrence options resolved for one event: a rule body plus the explicit
/// anchor the evaluator requires.
struct ResolvedRule<'a> {
    options: &'a str,
    anchor: DateTime<Utc>,
}

fn resolve_rule(event: &CalendarEvent) -> Option<ResolvedRule<'_>> {
    match event.recurrence.as_ref()? {
        RecurrenceRule::Rule { options, anchor } if !options.trim().is_empty() => {
            let anchor = match anchor {
                Some(anchor) => *anchor,
                None => event.start.to_utc()?,
            };
            Some(ResolvedRule { options, anchor })
        }
        // Decomposed rule sets carry no implicit anchor; the event start
        // anchors the first rule.
        RecurrenceRule::RuleSet { rules } => {
            let options = rules
                .first()
                .map(String::as_str)
                .filter(|rule| !rule.trim().is_empty())?;
            Some(ResolvedRule {
                options,
                anchor: event.start.to_utc()?,
            })
        }
        RecurrenceRule::Rule { .. } => None,
    }
}

/// Build the evaluator input. The anchor is written by its UTC wall clock;
/// zone reinterpretation happens after evaluation.
fn build_rule_input(resolved: &ResolvedRule) -> String {
    let body = resolved.options.trim();
    let body = body.strip_prefix("RRULE:").unwrap_or(body);
    format!(
        "DTSTART:{}\nRRULE:{}",
        resolved.anchor.format("%Y%m%dT%H%M%SZ"),
        body
    )
}

/// All rule occurrences inside `[window.start, window.end]`.
fn rule_occurrences(
    resolved: &ResolvedRule,
    window: &RequestWindow,
) -> ExpandResult<Vec<DateTime<Utc>>> {
    let rule_set: RRuleSet = build_rule_input(resolved)
        .parse()
        .map_err(|e| ExpandError::Rule(format!("{e}")))?;

    // after/before are exclusive; widen by a second to keep the window inclusive
    let tz: rrule::Tz = Utc.into();
    let after = (window.start - Duration::seconds(1)).with_timezone(&tz);
    let before = (window.end + Duration::seconds(1)).with_timezone(&tz);

    let result = rule_set.after(after).before(before).all(MAX_OCCURRENCES);
    Ok(result
        .dates
        .into_iter()
        .map(|date| date.with_timezone(&Utc))
        .collect())
}

/// Expand one event into its occurrences within the window.
///
/// Recurrence failure is contained here: the rule's output is discarded,
/// the event falls back to its direct occurrence list, and other events in
/// the same batch are unaffected.
pub fn expand_event(event: &CalendarEvent, window: &RequestWindow) -> Vec<Occurrence> {
    if let Some(resolved) = resolve_rule(event) {
        match rule_occurrences(&resolved, window) {
            Ok(dates) => {
                return dates
                    .into_iter()
                    .enumerate()
                    .map(|(index, date)| {
                        let date = match &event.start.tzid {
                            Some(tzid) => timezone::correct_occurrence(date.naive_utc(), tzid),
                            None => date,
                        };
                        Occurrence {
                            date,
                            index,
                            kind: SourceKind::Recurring,
                        }
                    })
                    .collect();
            }
            Err(err) => {
                tracing::warn!(
                    title = %event.title,
                    %err,
                    "recurrence expansion failed, using direct occurrences"
                );
            }
        }
    }

    event
        .direct_occurrences
        .iter()
        .enumerate()
        .map(|(index, date)| Occurrence {
            date: *date,
            index,
            kind: SourceKind::Single,
        })
        .collect()
}
