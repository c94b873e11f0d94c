//! Conversions between calvox types and Google Calendar API types.

use calvox_core::{CalendarEvent, EventTime, InsertEvent};
use google_calendar::types::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime, Reminders,
};

/// Build the Google event payload for one occurrence.
///
/// The window instants are UTC; the configured timezone is attached as the
/// display timezone. When the request is a meeting, a Meet conference is
/// requested with a fresh request id.
pub fn to_google_event(request: &InsertEvent) -> Event {
    let time_zone = request.timezone.name().to_string();

    let attendees: Vec<EventAttendee> = request
        .attendee_emails
        .iter()
        .map(|email| EventAttendee {
            email: email.clone(),
            display_name: String::new(),
            response_status: "needsAction".to_string(),
            additional_guests: 0,
            comment: String::new(),
            id: String::new(),
            optional: false,
            organizer: false,
            resource: false,
            self_: false,
        })
        .collect();

    let conference_data = request.with_conference.then(|| ConferenceData {
        create_request: Some(CreateConferenceRequest {
            request_id: format!("{}-meet", uuid::Uuid::new_v4()),
            conference_solution_key: Some(ConferenceSolutionKey {
                type_: "hangoutsMeet".to_string(),
            }),
            status: None,
        }),
        conference_id: String::new(),
        conference_solution: None,
        entry_points: Vec::new(),
        notes: String::new(),
        parameters: None,
        signature: String::new(),
    });

    Event {
        summary: request.summary.clone(),
        description: request.description.clone(),
        start: Some(EventDateTime {
            date: None,
            date_time: Some(request.window.start),
            time_zone: time_zone.clone(),
        }),
        end: Some(EventDateTime {
            date: None,
            date_time: Some(request.window.end),
            time_zone,
        }),
        attendees,
        conference_data,
        reminders: Some(Reminders {
            overrides: Vec::new(),
            use_default: true,
        }),
        ..Default::default()
    }
}

/// Convert a Google event into the provider-neutral form.
/// Returns `None` for events without usable start/end times.
pub fn from_google_event(event: Event) -> Option<CalendarEvent> {
    let start = google_time(event.start.as_ref())?;
    let end = google_time(event.end.as_ref())?;

    let conference_url = event.conference_data.as_ref().and_then(|cd| {
        cd.entry_points
            .iter()
            .find(|ep| ep.entry_point_type == "video")
            .map(|ep| ep.uri.clone())
    });

    Some(CalendarEvent {
        id: event.id,
        summary: if event.summary.is_empty() {
            "(No title)".to_string()
        } else {
            event.summary
        },
        description: if event.description.is_empty() {
            None
        } else {
            Some(event.description)
        },
        start,
        end,
        html_link: if event.html_link.is_empty() {
            None
        } else {
            Some(event.html_link)
        },
        attendees: event.attendees.into_iter().map(|a| a.email).collect(),
        conference_url,
    })
}

fn google_time(time: Option<&EventDateTime>) -> Option<EventTime> {
    let time = time?;
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}
