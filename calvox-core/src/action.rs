//! The parsed form of a user's calendar request.
//!
//! `ActionSuggestion` is produced by the intent extractor and, on the
//! confirm-or-override round trip, re-sent verbatim by the client. It must
//! therefore deserialize leniently: every field is defaulted so a payload
//! that round-tripped through the browser still parses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What the user asked the assistant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    Create,
    Read,
}

/// A normalized calendar action extracted from free-form user text.
///
/// Exactly one of the field groups is meaningful, gated by `kind`:
/// - `Create`: `summary`, `description`, `start_moment`, `duration_minutes`,
///   `occurrence_count`, `attendee_emails`
/// - `Read`: `range_start`, `range_end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSuggestion {
    /// Whether the request was well-formed and actionable. When false,
    /// `message` explains the rejection and no other field is trusted.
    pub valid: bool,

    pub kind: ActionKind,

    pub summary: String,
    pub description: String,

    /// Base start of the first occurrence (Create only).
    pub start_moment: Option<DateTime<Utc>>,
    pub duration_minutes: i64,

    /// Number of daily-spaced repeats to generate, at least 1.
    pub occurrence_count: u32,

    /// Non-empty means the user explicitly asked for a shared meeting,
    /// which implies a conferencing link and attendee invitations.
    pub attendee_emails: Vec<String>,

    /// Inclusive date range to read events from (Read only).
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,

    /// Human-readable feedback. Always present when `valid` is false.
    pub message: Option<String>,
}

impl Default for ActionSuggestion {
    fn default() -> Self {
        ActionSuggestion {
            valid: false,
            kind: ActionKind::Create,
            summary: String::new(),
            description: String::new(),
            start_moment: None,
            duration_minutes: 60,
            occurrence_count: 1,
            attendee_emails: Vec::new(),
            range_start: None,
            range_end: None,
            message: None,
        }
    }
}

impl ActionSuggestion {
    /// Occurrence count clamped to the documented minimum of 1.
    pub fn occurrences(&self) -> u32 {
        self.occurrence_count.max(1)
    }

    /// Event duration in minutes, falling back to the default of 60 when
    /// the payload carries a zero or negative value. Keeps every derived
    /// window at `end > start`.
    pub fn duration(&self) -> i64 {
        if self.duration_minutes > 0 {
            self.duration_minutes
        } else {
            60
        }
    }

    /// Whether committing this suggestion should attach a conference link
    /// and send invitations.
    pub fn is_meeting(&self) -> bool {
        !self.attendee_emails.is_empty()
    }
}
