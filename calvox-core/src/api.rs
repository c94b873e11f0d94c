//! Seams to the external LLM and calendar providers.
//!
//! Both are modeled as async traits so the orchestrator can be exercised
//! against in-memory fakes. The real implementations live in
//! `calvox-intent` (Gemini) and `calvox-provider-google`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::action::ActionSuggestion;
use crate::error::CalvoxResult;
use crate::event::{CalendarEvent, CreatedEvent};
use crate::window::TimeWindow;

/// Turns free-form user text into a structured suggestion.
///
/// `reference` anchors relative expressions ("today", "tomorrow") so the
/// extraction is deterministic for a given input and moment.
#[async_trait]
pub trait ExtractIntent {
    async fn extract(
        &self,
        text: &str,
        reference: DateTime<Utc>,
    ) -> CalvoxResult<ActionSuggestion>;
}

/// One event to create on the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertEvent {
    pub summary: String,
    pub description: String,
    pub window: TimeWindow,
    /// Timezone label attached to the provider payload. Window instants
    /// are UTC; this only controls how the provider displays them.
    pub timezone: Tz,
    pub attendee_emails: Vec<String>,
    /// Attach a conference link and send invitations to attendees.
    pub with_conference: bool,
}

/// The user's calendar, already scoped to authenticated credentials.
#[async_trait]
pub trait CalendarApi {
    /// Events on the primary calendar between `from` and `to`,
    /// single-occurrence-expanded, ordered by start time. Read-only.
    async fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CalvoxResult<Vec<CalendarEvent>>;

    /// Create exactly one event. Not idempotent: repeated calls create
    /// duplicates, so the caller commits each occurrence at most once.
    async fn insert_event(&self, request: &InsertEvent) -> CalvoxResult<CreatedEvent>;
}
