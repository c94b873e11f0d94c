//! Provider-neutral event types.
//!
//! Providers convert their API responses into these types; the orchestrator
//! and the HTTP layer work exclusively with them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Start or end of an event: all-day events carry only a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// Resolve to a concrete instant for window comparisons.
    /// All-day dates resolve to midnight UTC, so an all-day event still
    /// participates in overlap checks.
    pub fn as_instant(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_hms_opt(0, 0, 0).unwrap().and_utc(),
        }
    }
}

/// A calendar event as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    /// Shareable link to the event in the provider's UI.
    pub html_link: Option<String>,
    /// Attendee email addresses.
    pub attendees: Vec<String>,
    /// Conference/video call URL, if the event has one.
    pub conference_url: Option<String>,
}

/// The result of committing one occurrence: the provider-assigned id and
/// the shareable link returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub id: String,
    pub html_link: String,
}
