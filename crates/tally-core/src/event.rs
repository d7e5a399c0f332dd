//! Domain event types.
//!
//! Events travel in a flat wire shape (`eventId`, `aggregateId`, `type`,
//! `data`, `timestamp`, `version`). Inside the crate the `type`/`data` pair
//! is lifted into [`EventPayload`] so known types are checked once, at the
//! boundary, and never again during replay.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::LedgerError;

/// Type tag of a credit event.
pub const CREDIT_EVENT_TYPE: &str = "CREDIT";

/// Type tag of a debit event.
pub const DEBIT_EVENT_TYPE: &str = "DEBIT";

/// Monetary amount. Any JSON number is accepted, fractional or not.
pub type Amount = f64;

/// Globally unique identity of a single event occurrence. Used as the
/// idempotency key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifies the aggregate stream an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(String);

impl AggregateId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AggregateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Event payload variants, keyed by the wire `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Money paid into the aggregate.
    Credit {
        /// Amount credited.
        amount: Amount,
    },
    /// Money taken out of the aggregate.
    Debit {
        /// Amount debited.
        amount: Amount,
    },
    /// Any type this crate does not interpret. Stored and carried, ignored by
    /// the account fold.
    Other {
        /// The `type` tag as received.
        kind: String,
        /// The `data` payload as received.
        data: Value,
    },
}

impl EventPayload {
    /// Lifts a raw `type`/`data` pair into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedEvent` if a `CREDIT` or `DEBIT` payload
    /// has no numeric `amount`. Unknown types are never an error.
    pub fn from_raw(event_id: &EventId, kind: &str, data: Value) -> Result<Self, LedgerError> {
        match kind {
            CREDIT_EVENT_TYPE => Ok(Self::Credit {
                amount: read_amount(event_id, &data)?,
            }),
            DEBIT_EVENT_TYPE => Ok(Self::Debit {
                amount: read_amount(event_id, &data)?,
            }),
            _ => Ok(Self::Other {
                kind: kind.to_owned(),
                data,
            }),
        }
    }

    /// Returns the wire `type` tag.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Credit { .. } => CREDIT_EVENT_TYPE,
            Self::Debit { .. } => DEBIT_EVENT_TYPE,
            Self::Other { kind, .. } => kind,
        }
    }

    /// Returns the wire `data` object.
    #[must_use]
    pub fn to_data(&self) -> Value {
        match self {
            Self::Credit { amount } | Self::Debit { amount } => json!({ "amount": amount }),
            Self::Other { data, .. } => data.clone(),
        }
    }
}

fn read_amount(event_id: &EventId, data: &Value) -> Result<Amount, LedgerError> {
    let amount = data
        .get("amount")
        .ok_or_else(|| LedgerError::MalformedEvent {
            event_id: event_id.clone(),
            reason: "missing `amount`".to_owned(),
        })?;
    amount.as_f64().ok_or_else(|| LedgerError::MalformedEvent {
        event_id: event_id.clone(),
        reason: format!("`amount` must be a number, got {amount}"),
    })
}

/// An immutable fact about an aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireEvent", into = "WireEvent")]
pub struct DomainEvent {
    /// Idempotency key, unique across the whole ledger.
    pub event_id: EventId,
    /// The aggregate stream this event belongs to.
    pub aggregate_id: AggregateId,
    /// Typed payload.
    pub payload: EventPayload,
    /// Replay ordering key. Not assumed monotonic with insertion order.
    pub timestamp: i64,
    /// Caller-assigned sequence hint. Carried, never enforced.
    pub version: i64,
}

impl DomainEvent {
    /// Creates an event from an already typed payload.
    #[must_use]
    pub fn new(
        event_id: EventId,
        aggregate_id: AggregateId,
        payload: EventPayload,
        timestamp: i64,
        version: i64,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            payload,
            timestamp,
            version,
        }
    }

    /// Creates an event from its raw wire parts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedEvent` if the payload of a known type is
    /// malformed.
    pub fn from_raw(
        event_id: EventId,
        aggregate_id: AggregateId,
        kind: &str,
        data: Value,
        timestamp: i64,
        version: i64,
    ) -> Result<Self, LedgerError> {
        let payload = EventPayload::from_raw(&event_id, kind, data)?;
        Ok(Self::new(event_id, aggregate_id, payload, timestamp, version))
    }

    /// Returns the wire `type` tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.payload.type_tag()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    event_id: EventId,
    aggregate_id: AggregateId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    timestamp: i64,
    version: i64,
}

impl TryFrom<WireEvent> for DomainEvent {
    type Error = LedgerError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        Self::from_raw(
            wire.event_id,
            wire.aggregate_id,
            &wire.kind,
            wire.data,
            wire.timestamp,
            wire.version,
        )
    }
}

impl From<DomainEvent> for WireEvent {
    fn from(event: DomainEvent) -> Self {
        Self {
            kind: event.payload.type_tag().to_owned(),
            data: event.payload.to_data(),
            event_id: event.event_id,
            aggregate_id: event.aggregate_id,
            timestamp: event.timestamp,
            version: event.version,
        }
    }
}
