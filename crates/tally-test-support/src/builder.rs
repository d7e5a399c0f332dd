//! Concise constructors for `DomainEvent` fixtures.

use serde_json::{Value, json};
use tally_core::event::{AggregateId, Amount, DomainEvent, EventId, EventPayload};

/// Builds a `DomainEvent` field by field. Unset fields default to a fresh
/// random event id, aggregate `acc-1`, timestamp `0` and version `1`.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event_id: Option<EventId>,
    aggregate_id: AggregateId,
    payload: EventPayload,
    timestamp: i64,
    version: i64,
}

impl EventBuilder {
    fn with_payload(payload: EventPayload) -> Self {
        Self {
            event_id: None,
            aggregate_id: AggregateId::new("acc-1"),
            payload,
            timestamp: 0,
            version: 1,
        }
    }

    /// Starts a `CREDIT` event.
    #[must_use]
    pub fn credit(amount: impl Into<Amount>) -> Self {
        Self::with_payload(EventPayload::Credit {
            amount: amount.into(),
        })
    }

    /// Starts a `DEBIT` event.
    #[must_use]
    pub fn debit(amount: impl Into<Amount>) -> Self {
        Self::with_payload(EventPayload::Debit {
            amount: amount.into(),
        })
    }

    /// Starts an event of a type the account fold does not interpret.
    #[must_use]
    pub fn other(kind: &str, data: Value) -> Self {
        Self::with_payload(EventPayload::Other {
            kind: kind.to_owned(),
            data,
        })
    }

    /// Sets the event id.
    #[must_use]
    pub fn id(mut self, event_id: &str) -> Self {
        self.event_id = Some(EventId::new(event_id));
        self
    }

    /// Sets the aggregate id.
    #[must_use]
    pub fn aggregate(mut self, aggregate_id: &str) -> Self {
        self.aggregate_id = AggregateId::new(aggregate_id);
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the version hint.
    #[must_use]
    pub fn version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    /// Finishes the event.
    #[must_use]
    pub fn build(self) -> DomainEvent {
        DomainEvent::new(
            self.event_id.unwrap_or_else(EventId::generate),
            self.aggregate_id,
            self.payload,
            self.timestamp,
            self.version,
        )
    }
}

/// A `CREDIT` event with the given identity, amount and timestamp.
#[must_use]
pub fn credit(
    event_id: &str,
    aggregate_id: &str,
    amount: impl Into<Amount>,
    timestamp: i64,
) -> DomainEvent {
    EventBuilder::credit(amount)
        .id(event_id)
        .aggregate(aggregate_id)
        .at(timestamp)
        .build()
}

/// A `DEBIT` event with the given identity, amount and timestamp.
#[must_use]
pub fn debit(
    event_id: &str,
    aggregate_id: &str,
    amount: impl Into<Amount>,
    timestamp: i64,
) -> DomainEvent {
    EventBuilder::debit(amount)
        .id(event_id)
        .aggregate(aggregate_id)
        .at(timestamp)
        .build()
}

/// An event of an unrecognized `kind` with an empty payload.
#[must_use]
pub fn unrecognized(event_id: &str, aggregate_id: &str, kind: &str, timestamp: i64) -> DomainEvent {
    EventBuilder::other(kind, json!({}))
        .id(event_id)
        .aggregate(aggregate_id)
        .at(timestamp)
        .build()
}
