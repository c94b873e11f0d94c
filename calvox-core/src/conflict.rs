//! Conflict detection against existing calendar events.

use crate::api::CalendarApi;
use crate::error::CalvoxResult;
use crate::event::CalendarEvent;
use crate::window::TimeWindow;

/// Existing events whose window intersects `window`, in provider order
/// (ascending start time).
///
/// The provider query is already bounded to the window, but the results are
/// filtered again with the half-open rule so events that merely touch the
/// window boundary are not reported as conflicts.
pub async fn find_conflicts<C>(
    calendar: &C,
    window: &TimeWindow,
) -> CalvoxResult<Vec<CalendarEvent>>
where
    C: CalendarApi + ?Sized,
{
    let candidates = calendar.events_between(window.start, window.end).await?;

    Ok(candidates
        .into_iter()
        .filter(|event| {
            let existing = TimeWindow {
                start: event.start.as_instant(),
                end: event.end.as_instant(),
            };
            window.overlaps(&existing)
        })
        .collect())
}
