//! Google Calendar provider for calvox.
//!
//! Wraps the `google-calendar` client with per-user credentials and
//! implements the `CalendarApi` seam: listing events in a time range and
//! inserting single events, optionally with a Meet conference and attendee
//! invitations.

pub mod convert;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use google_calendar::Client;
use google_calendar::types::{OrderBy, SendUpdates};

use calvox_core::{CalendarApi, CalendarEvent, CalvoxError, CalvoxResult, CreatedEvent, InsertEvent};

pub use types::{AccountTokens, GoogleCredentials};

/// Google's alias for the user's main calendar.
const DEFAULT_CALENDAR_ID: &str = "primary";

/// Redirect URI registered with the OAuth app. Unused at request time
/// (tokens are provisioned out of band) but required by the client.
const REDIRECT_URI: &str = "http://localhost:8085/callback";

/// One user's Google Calendar, scoped to their stored tokens.
pub struct GoogleCalendar {
    client: Client,
    calendar_id: String,
}

impl GoogleCalendar {
    pub fn new(creds: &GoogleCredentials, tokens: &AccountTokens) -> Self {
        let client = Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            REDIRECT_URI.to_string(),
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
        );

        GoogleCalendar {
            client,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
        }
    }
}

#[async_trait]
impl CalendarApi for GoogleCalendar {
    async fn events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> CalvoxResult<Vec<CalendarEvent>> {
        tracing::debug!(%from, %to, "listing events");

        let time_min = from.to_rfc3339();
        let time_max = to.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                &self.calendar_id,
                "", // iCalUID filter
                0,  // max attendees
                OrderBy::StartTime,
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // expand recurring events into single occurrences
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .map_err(|e| CalvoxError::Provider(format!("Failed to list events: {e}")))?;

        Ok(response
            .body
            .into_iter()
            .filter(|event| event.status != "cancelled" && !event.id.is_empty())
            .filter_map(convert::from_google_event)
            .collect())
    }

    async fn insert_event(&self, request: &InsertEvent) -> CalvoxResult<CreatedEvent> {
        tracing::debug!(
            summary = %request.summary,
            start = %request.window.start,
            conference = request.with_conference,
            "inserting event"
        );

        let event = convert::to_google_event(request);

        // Conference creation needs conferenceDataVersion=1; invitations go
        // out only for meetings.
        let response = if request.with_conference {
            self.client
                .events()
                .insert(&self.calendar_id, 1, 0, true, SendUpdates::All, false, &event)
                .await
        } else {
            self.client
                .events()
                .insert(&self.calendar_id, 0, 0, false, SendUpdates::None, false, &event)
                .await
        }
        .map_err(|e| CalvoxError::Provider(format!("Failed to create event: {e}")))?;

        let created = response.body;
        if created.id.is_empty() {
            return Err(CalvoxError::Provider(
                "Provider returned an event without an id".into(),
            ));
        }

        Ok(CreatedEvent {
            id: created.id,
            html_link: created.html_link,
        })
    }
}
