//! Core of the mantel dashboard's calendar feed integration.
//!
//! The dashboard's per-widget glue (proxying a service API, reshaping its
//! JSON) lives elsewhere; this crate owns the one algorithmically dense
//! path: turning parsed calendar events into deterministic day-level
//! instances that survive repeated refreshes without duplicating or
//! flickering.
//!
//! Pipeline, per feed refresh:
//! parsed events → [`recurrence::expand_event`] → [`instance::split_span`] →
//! [`instance::instance_id`] → [`aggregate::InstanceMap::merge`].

pub mod aggregate;
pub mod error;
pub mod event;
pub mod feed;
pub mod instance;
pub mod recurrence;
pub mod source;
pub mod timezone;
pub mod window;

pub use aggregate::InstanceMap;
pub use error::FeedError;
pub use event::{CalendarEvent, EventStamp, RecurrenceRule};
pub use feed::{refresh_feed, FeedConfig, FeedRefresh, ParsedFeed};
pub use instance::{EventInstance, SourceKind};
pub use source::parse_feed;
pub use window::RequestWindow;
