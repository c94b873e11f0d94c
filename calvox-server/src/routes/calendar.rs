//! The calendar request endpoint.
//!
//! One authenticated POST takes either fresh user text or a previously
//! suggested action echoed back with `overrideOverlap: true`, runs the
//! orchestrator, and maps the outcome onto the wire shapes the client
//! expects.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;

use calvox_core::{
    ActionSuggestion, CalendarEvent, CalendarRequest, CalvoxError, CalvoxResult, RequestOutcome,
    handle_request,
};
use calvox_provider_google::GoogleCalendar;

use crate::auth;
use crate::routes::{AppError, FailureBody};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar-request", post(calendar_request))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}

/// POST /calendar-request - process one natural-language calendar request
async fn calendar_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = auth::bearer_session(&headers)?;
    let tokens = auth::load_session_tokens(&session)?;
    let calendar = GoogleCalendar::new(&state.config.google, &tokens);

    let request = parse_request(body)?;
    tracing::info!(
        overriding = matches!(request, CalendarRequest::Override(_)),
        "processing calendar request"
    );

    let outcome = handle_request(
        state.extractor.as_ref(),
        &calendar,
        request,
        Utc::now(),
        state.config.timezone,
    )
    .await?;

    Ok(Json(outcome_body(outcome)?))
}

/// Split the inbound body into the two request forms. The override form is
/// the flattened suggestion we previously returned, plus the flag.
fn parse_request(body: serde_json::Value) -> CalvoxResult<CalendarRequest> {
    let overriding = body
        .get("overrideOverlap")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    if overriding {
        let suggestion: ActionSuggestion = serde_json::from_value(body)
            .map_err(|e| CalvoxError::InvalidRequest(format!("Invalid override payload: {e}")))?;
        return Ok(CalendarRequest::Override(suggestion));
    }

    let text = body
        .get("text")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CalvoxError::InvalidRequest("No text provided for AI processing.".into())
        })?;

    Ok(CalendarRequest::Text(text.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    success: bool,
    calendar_links: Vec<String>,
    feedback: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadResponse {
    success: bool,
    events: Vec<CalendarEvent>,
    feedback: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmResponse {
    success: bool,
    action: &'static str,
    feedback: String,
    overlapping_events: Vec<CalendarEvent>,
    suggestion: ActionSuggestion,
}

/// Map an orchestrator outcome onto the wire shape the client expects.
/// Always HTTP 200; the client branches on `success` and `action`.
fn outcome_body(outcome: RequestOutcome) -> CalvoxResult<serde_json::Value> {
    let body = match outcome {
        RequestOutcome::Created { created, feedback } => {
            serde_json::to_value(CreateResponse {
                success: true,
                calendar_links: created.into_iter().map(|c| c.html_link).collect(),
                feedback,
            })
        }
        RequestOutcome::Events { events, feedback } => serde_json::to_value(ReadResponse {
            success: true,
            events,
            feedback,
        }),
        RequestOutcome::NeedsConfirmation {
            conflicts,
            suggestion,
            feedback,
        } => serde_json::to_value(ConfirmResponse {
            success: false,
            action: "confirm_create",
            feedback,
            overlapping_events: conflicts,
            suggestion,
        }),
        RequestOutcome::Rejected { feedback } => serde_json::to_value(FailureBody {
            success: false,
            feedback,
        }),
    };

    body.map_err(|e| CalvoxError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calvox_core::{ActionKind, CreatedEvent, EventTime};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn plain_text_body_parses_as_a_text_request() {
        let request = parse_request(json!({ "text": "meeting tomorrow at 3pm" })).unwrap();
        assert_eq!(
            request,
            CalendarRequest::Text("meeting tomorrow at 3pm".to_string())
        );
    }

    #[test]
    fn missing_text_is_an_invalid_request() {
        let err = parse_request(json!({})).unwrap_err();
        assert!(matches!(err, CalvoxError::InvalidRequest(_)));

        let err = parse_request(json!({ "text": "   " })).unwrap_err();
        assert!(matches!(err, CalvoxError::InvalidRequest(_)));
    }

    #[test]
    fn override_body_parses_as_the_flattened_suggestion() {
        let body = json!({
            "overrideOverlap": true,
            "valid": true,
            "kind": "create",
            "summary": "launch meeting",
            "startMoment": "2024-01-02T15:00:00Z",
            "durationMinutes": 60,
            "occurrenceCount": 2
        });

        let CalendarRequest::Override(suggestion) = parse_request(body).unwrap() else {
            panic!("expected an override request");
        };
        assert_eq!(suggestion.summary, "launch meeting");
        assert_eq!(suggestion.occurrence_count, 2);
    }

    #[test]
    fn override_false_still_needs_text() {
        let err = parse_request(json!({ "overrideOverlap": false })).unwrap_err();
        assert!(matches!(err, CalvoxError::InvalidRequest(_)));
    }

    fn body_of(outcome: RequestOutcome) -> serde_json::Value {
        outcome_body(outcome).unwrap()
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent {
            id: "busy-1".to_string(),
            summary: "Standup".to_string(),
            description: None,
            start: EventTime::DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap()),
            html_link: None,
            attendees: Vec::new(),
            conference_url: None,
        }
    }

    #[test]
    fn created_outcome_returns_calendar_links() {
        let body = body_of(RequestOutcome::Created {
            created: vec![CreatedEvent {
                id: "evt-1".to_string(),
                html_link: "https://calendar.example.com/evt-1".to_string(),
            }],
            feedback: "Event created successfully!".to_string(),
        });

        assert_eq!(body["success"], true);
        assert_eq!(body["calendarLinks"][0], "https://calendar.example.com/evt-1");
        assert_eq!(body["feedback"], "Event created successfully!");
    }

    #[test]
    fn confirmation_outcome_carries_the_suggestion_and_conflicts() {
        let suggestion = ActionSuggestion {
            valid: true,
            kind: ActionKind::Create,
            summary: "launch meeting".to_string(),
            start_moment: Some(Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap()),
            ..Default::default()
        };

        let body = body_of(RequestOutcome::NeedsConfirmation {
            conflicts: vec![sample_event()],
            suggestion,
            feedback: "You have an overlapping event. Do you want to create this event anyway?"
                .to_string(),
        });

        assert_eq!(body["success"], false);
        assert_eq!(body["action"], "confirm_create");
        assert_eq!(body["overlappingEvents"][0]["summary"], "Standup");
        assert_eq!(body["suggestion"]["summary"], "launch meeting");
        assert_eq!(body["suggestion"]["startMoment"], "2024-01-02T15:00:00Z");
    }

    #[test]
    fn read_outcome_returns_events() {
        let body = body_of(RequestOutcome::Events {
            events: vec![sample_event()],
            feedback: "Found 1 events.".to_string(),
        });

        assert_eq!(body["success"], true);
        assert_eq!(body["events"][0]["id"], "busy-1");
    }

    #[test]
    fn rejection_outcome_is_a_plain_failure() {
        let body = body_of(RequestOutcome::Rejected {
            feedback: "Please provide specific time for the event.".to_string(),
        });

        assert_eq!(body["success"], false);
        assert_eq!(body["feedback"], "Please provide specific time for the event.");
        assert!(body.get("action").is_none());
    }
}
