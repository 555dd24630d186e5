//! Error types for feed processing.

use thiserror::Error;

/// Per-feed, user-facing failures.
///
/// Informational only: a failing feed contributes no instances for its
/// round but never prevents other feeds from rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("'{feed}': {message}")]
    Fetch { feed: String, message: String },

    #[error("'{feed}': failed to parse calendar document")]
    Parse { feed: String },

    #[error("'{feed}': no events found")]
    NoEvents { feed: String },
}

/// Recurrence rule construction or evaluation failure.
///
/// Recovered per event: the rule's output is discarded and the event falls
/// back to its direct occurrence list.
#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("invalid recurrence rule: {0}")]
    Rule(String),
}

pub type ExpandResult<T> = Result<T, ExpandError>;
