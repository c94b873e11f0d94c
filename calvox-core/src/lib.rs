//! Core types and orchestration for the calvox ecosystem.
//!
//! This crate provides everything shared between the server and the
//! provider/extractor crates:
//! - `ActionSuggestion` and related types describing a parsed user request
//! - `TimeWindow` and the overlap rule used for conflict detection
//! - the `ExtractIntent` and `CalendarApi` seams implemented by
//!   `calvox-intent` and `calvox-provider-google`
//! - the `orchestrate` module that runs a request end-to-end

pub mod action;
pub mod api;
pub mod conflict;
pub mod error;
pub mod event;
pub mod orchestrate;
pub mod window;

// Re-export the common types at crate root for convenience
pub use action::{ActionKind, ActionSuggestion};
pub use api::{CalendarApi, ExtractIntent, InsertEvent};
pub use error::{CalvoxError, CalvoxResult};
pub use event::{CalendarEvent, CreatedEvent, EventTime};
pub use orchestrate::{CalendarRequest, RequestOutcome, handle_request};
pub use window::TimeWindow;
