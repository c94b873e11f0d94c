//! Request orchestration: extraction, conflict checks, and the commit loop.
//!
//! A request runs through `Extracting -> PerOccurrence -> Aggregating`,
//! with two early exits: a rejection from the extractor, and a conflict on
//! the first occurrence which halts the whole request and asks the client
//! to confirm. The confirmation state is never stored server-side; the
//! client re-sends the suggested action with the override flag set.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::action::{ActionKind, ActionSuggestion};
use crate::api::{CalendarApi, ExtractIntent, InsertEvent};
use crate::conflict::find_conflicts;
use crate::error::{CalvoxError, CalvoxResult};
use crate::event::{CalendarEvent, CreatedEvent};
use crate::window::{TimeWindow, day_span};

/// One inbound request: fresh text to extract, or a previously suggested
/// action the client confirmed despite a conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarRequest {
    Text(String),
    Override(ActionSuggestion),
}

/// Outcome of one fully processed request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// One or more occurrences were committed. `created` may be shorter
    /// than requested when a later occurrence hit a conflict.
    Created {
        created: Vec<CreatedEvent>,
        feedback: String,
    },
    /// Events found for a read request.
    Events {
        events: Vec<CalendarEvent>,
        feedback: String,
    },
    /// The first occurrence conflicts with existing events. Nothing was
    /// committed; the client holds `suggestion` and may re-submit it with
    /// the override flag to commit anyway.
    NeedsConfirmation {
        conflicts: Vec<CalendarEvent>,
        suggestion: ActionSuggestion,
        feedback: String,
    },
    /// The request was well-formed but rejected (past time, vague time,
    /// off-topic). `feedback` carries the extractor's message verbatim.
    Rejected { feedback: String },
}

/// Process one calendar request end-to-end.
///
/// `now` anchors relative date expressions for the extractor; `timezone`
/// is the display timezone attached to created events.
pub async fn handle_request<E, C>(
    extractor: &E,
    calendar: &C,
    request: CalendarRequest,
    now: DateTime<Utc>,
    timezone: Tz,
) -> CalvoxResult<RequestOutcome>
where
    E: ExtractIntent + ?Sized,
    C: CalendarApi + ?Sized,
{
    let (suggestion, overriding) = match request {
        CalendarRequest::Override(mut suggestion) => {
            // The client echoes back a suggestion we produced earlier.
            // It is trusted verbatim; force it actionable.
            suggestion.valid = true;
            (suggestion, true)
        }
        CalendarRequest::Text(text) => (extractor.extract(&text, now).await?, false),
    };

    if !suggestion.valid {
        let feedback = suggestion
            .message
            .unwrap_or_else(|| "Sorry, I could not understand that request.".to_string());
        return Ok(RequestOutcome::Rejected { feedback });
    }

    match suggestion.kind {
        ActionKind::Read => read_events(calendar, &suggestion).await,
        ActionKind::Create => create_occurrences(calendar, suggestion, overriding, timezone).await,
    }
}

async fn read_events<C>(
    calendar: &C,
    suggestion: &ActionSuggestion,
) -> CalvoxResult<RequestOutcome>
where
    C: CalendarApi + ?Sized,
{
    let (Some(range_start), Some(range_end)) = (suggestion.range_start, suggestion.range_end)
    else {
        return Err(CalvoxError::InvalidRequest(
            "Missing date range for read request".into(),
        ));
    };

    let (from, to) = day_span(range_start, range_end);
    let events = calendar.events_between(from, to).await?;
    let feedback = format!("Found {} events.", events.len());

    Ok(RequestOutcome::Events { events, feedback })
}

async fn create_occurrences<C>(
    calendar: &C,
    suggestion: ActionSuggestion,
    overriding: bool,
    timezone: Tz,
) -> CalvoxResult<RequestOutcome>
where
    C: CalendarApi + ?Sized,
{
    let Some(base_start) = suggestion.start_moment else {
        return Ok(RequestOutcome::Rejected {
            feedback: "Please provide specific time for the event.".to_string(),
        });
    };

    let requested = suggestion.occurrences();
    let mut created: Vec<CreatedEvent> = Vec::with_capacity(requested as usize);
    let mut halted_at: Option<u32> = None;

    for index in 0..requested {
        let window = TimeWindow::for_occurrence(base_start, suggestion.duration(), index);

        // Override skips conflict checks entirely, for every occurrence:
        // the user already saw the first conflict and chose to proceed.
        if !overriding {
            let conflicts = find_conflicts(calendar, &window).await?;
            if !conflicts.is_empty() {
                if index == 0 {
                    // Hard stop before anything is committed; the client
                    // must confirm. Later occurrences degrade to best
                    // effort instead of prompting again.
                    let feedback = confirm_feedback(&suggestion);
                    return Ok(RequestOutcome::NeedsConfirmation {
                        conflicts,
                        suggestion,
                        feedback,
                    });
                }
                halted_at = Some(index);
                break;
            }
        }

        let result = calendar
            .insert_event(&InsertEvent {
                summary: suggestion.summary.clone(),
                description: suggestion.description.clone(),
                window,
                timezone,
                attendee_emails: suggestion.attendee_emails.clone(),
                with_conference: suggestion.is_meeting(),
            })
            .await?;
        created.push(result);
    }

    let feedback = create_feedback(&suggestion, created.len() as u32, requested, halted_at);
    Ok(RequestOutcome::Created { created, feedback })
}

fn confirm_feedback(suggestion: &ActionSuggestion) -> String {
    if suggestion.is_meeting() {
        "You have an overlapping meeting. Do you want to create this meeting anyway?".to_string()
    } else {
        "You have an overlapping event. Do you want to create this event anyway?".to_string()
    }
}

fn create_feedback(
    suggestion: &ActionSuggestion,
    created: u32,
    requested: u32,
    halted_at: Option<u32>,
) -> String {
    let noun = if suggestion.is_meeting() {
        "meeting"
    } else {
        "event"
    };

    match halted_at {
        Some(day) => format!(
            "Created {created} of {requested} requested {noun}s; stopped at an overlap on day {}.",
            day + 1
        ),
        None if requested == 1 => {
            let cap = if suggestion.is_meeting() {
                "Meeting"
            } else {
                "Event"
            };
            format!("{cap} created successfully!")
        }
        None => format!("Created all {requested} requested {noun}s."),
    }
}
