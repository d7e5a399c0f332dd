//! Thread-safe handle around an `EventLedger`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::account::AccountState;
use tally_core::aggregate::Aggregate;
use tally_core::event::{AggregateId, DomainEvent};

use crate::event_ledger::{AppendOutcome, EventLedger};

/// Cloneable handle that linearizes every append and read behind one mutex.
///
/// Clones share the same ledger. Reads return owned events because the lock
/// is released before the caller sees them.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<EventLedger>>,
}

impl SharedLedger {
    /// Creates a handle around an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle around an existing ledger.
    #[must_use]
    pub fn from_ledger(ledger: EventLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // Every ledger mutation is a single map insert, so a poisoned lock never
    // guards a half-applied append.
    fn lock(&self) -> MutexGuard<'_, EventLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`EventLedger::append`].
    pub fn append(&self, event: DomainEvent) -> AppendOutcome {
        self.lock().append(event)
    }

    /// See [`EventLedger::get_events`].
    #[must_use]
    pub fn get_events(&self, aggregate_id: &str) -> Vec<DomainEvent> {
        self.lock()
            .get_events(aggregate_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// See [`EventLedger::replay`].
    #[must_use]
    pub fn replay(&self, aggregate_id: &str) -> AccountState {
        self.lock().replay(aggregate_id)
    }

    /// See [`EventLedger::replay_as`].
    #[must_use]
    pub fn replay_as<A: Aggregate>(&self, aggregate_id: &str) -> A {
        self.lock().replay_as(aggregate_id)
    }

    /// See [`EventLedger::contains`].
    #[must_use]
    pub fn contains(&self, event_id: &str) -> bool {
        self.lock().contains(event_id)
    }

    /// See [`EventLedger::aggregate_ids`]. Returns owned ids.
    #[must_use]
    pub fn aggregate_ids(&self) -> Vec<AggregateId> {
        self.lock().aggregate_ids().into_iter().cloned().collect()
    }

    /// See [`EventLedger::len`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// See [`EventLedger::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
