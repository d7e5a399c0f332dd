//! Domain error types.

use thiserror::Error;

use crate::event::EventId;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A known event type whose payload does not have the expected shape.
    /// Scoped to the single offending event.
    #[error("malformed event {event_id}: {reason}")]
    MalformedEvent {
        /// The event that failed validation.
        event_id: EventId,
        /// What was wrong with the payload.
        reason: String,
    },
}
