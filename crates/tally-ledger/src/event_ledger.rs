//! Append-only event ledger.
//!
//! Stored events live in one insertion-ordered map keyed by `event_id`. The
//! map is both the log (iteration order is append order) and the
//! deduplication index, so the two can never drift apart.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tally_core::account::AccountState;
use tally_core::aggregate::Aggregate;
use tally_core::event::{AggregateId, DomainEvent, EventId};
use tracing::{debug, instrument};

/// What `append` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The event was new and has been stored.
    Appended,
    /// An event with the same `event_id` was already stored; nothing changed.
    Duplicate,
}

/// In-memory, append-only store of domain events.
#[derive(Debug, Clone, Default)]
pub struct EventLedger {
    events: IndexMap<EventId, DomainEvent>,
}

impl EventLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event unless its `event_id` has been seen before.
    ///
    /// A duplicate is discarded as a whole, even if its other fields differ
    /// from the stored event.
    pub fn append(&mut self, event: DomainEvent) -> AppendOutcome {
        match self.events.entry(event.event_id.clone()) {
            Entry::Occupied(_) => {
                debug!(
                    event_id = %event.event_id,
                    aggregate_id = %event.aggregate_id,
                    "duplicate event ignored"
                );
                AppendOutcome::Duplicate
            }
            Entry::Vacant(slot) => {
                debug!(
                    event_id = %event.event_id,
                    aggregate_id = %event.aggregate_id,
                    event_type = event.event_type(),
                    timestamp = event.timestamp,
                    "event appended"
                );
                slot.insert(event);
                AppendOutcome::Appended
            }
        }
    }

    /// Returns the events of one aggregate, ascending by `timestamp`.
    ///
    /// Events sharing a timestamp keep their append order.
    #[must_use]
    pub fn get_events(&self, aggregate_id: &str) -> Vec<&DomainEvent> {
        let mut events: Vec<&DomainEvent> = self
            .events
            .values()
            .filter(|event| event.aggregate_id.as_str() == aggregate_id)
            .collect();
        // `sort_by_key` is stable; insertion order breaks ties.
        events.sort_by_key(|event| event.timestamp);
        events
    }

    /// Rebuilds the account state of one aggregate.
    #[must_use]
    pub fn replay(&self, aggregate_id: &str) -> AccountState {
        self.replay_as(aggregate_id)
    }

    /// Rebuilds any aggregate by folding its timestamp-ordered events.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn replay_as<A: Aggregate>(&self, aggregate_id: &str) -> A {
        let events = self.get_events(aggregate_id);
        debug!(event_count = events.len(), "replaying aggregate");
        A::fold(events)
    }

    /// Returns whether an event with this id has been stored.
    #[must_use]
    pub fn contains(&self, event_id: &str) -> bool {
        self.events.contains_key(event_id)
    }

    /// Distinct aggregate ids, in the order they were first appended.
    #[must_use]
    pub fn aggregate_ids(&self) -> Vec<&AggregateId> {
        let mut seen = HashSet::new();
        self.events
            .values()
            .map(|event| &event.aggregate_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Number of stored events across all aggregates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tally_test_support::{EventBuilder, credit, debit, unrecognized};

    use super::*;

    fn ids(events: &[&DomainEvent]) -> Vec<String> {
        events.iter().map(|e| e.event_id.to_string()).collect()
    }

    // --- append ---

    #[test]
    fn test_append_stores_new_event() {
        // Arrange
        let mut ledger = EventLedger::new();

        // Act
        let outcome = ledger.append(credit("e1", "acc-1", 100, 1000));

        // Assert
        assert_eq!(outcome, AppendOutcome::Appended);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains("e1"));
    }

    #[test]
    fn test_append_ignores_repeated_event_id() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 100, 1000));

        let outcome = ledger.append(credit("e1", "acc-1", 100, 1000));

        assert_eq!(outcome, AppendOutcome::Duplicate);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_append_keeps_first_event_when_duplicate_differs() {
        // Arrange
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 100, 1000));

        // Act
        let outcome = ledger.append(debit("e1", "acc-2", 999, 1));

        // Assert
        assert_eq!(outcome, AppendOutcome::Duplicate);
        assert!(ledger.get_events("acc-2").is_empty());
        assert_eq!(ledger.replay("acc-1").balance, 100.0);
    }

    #[test]
    fn test_event_ids_are_unique_across_aggregates() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("shared", "acc-1", 10, 1));

        let outcome = ledger.append(credit("shared", "acc-2", 10, 1));

        assert_eq!(outcome, AppendOutcome::Duplicate);
        assert_eq!(ledger.aggregate_ids().len(), 1);
    }

    // --- get_events ---

    #[test]
    fn test_get_events_orders_by_timestamp() {
        // Arrange
        let mut ledger = EventLedger::new();
        ledger.append(credit("late", "acc-1", 1, 300));
        ledger.append(credit("early", "acc-1", 1, 100));
        ledger.append(credit("middle", "acc-1", 1, 200));

        // Act
        let events = ledger.get_events("acc-1");

        // Assert
        assert_eq!(ids(&events), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_get_events_keeps_append_order_on_equal_timestamps() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("b", "acc-1", 1, 500));
        ledger.append(debit("a", "acc-1", 1, 500));
        ledger.append(credit("c", "acc-1", 1, 400));
        ledger.append(credit("d", "acc-1", 1, 500));

        let events = ledger.get_events("acc-1");

        assert_eq!(ids(&events), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_get_events_filters_by_aggregate() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 1, 1));
        ledger.append(credit("e2", "acc-2", 1, 2));
        ledger.append(credit("e3", "acc-1", 1, 3));

        let events = ledger.get_events("acc-1");

        assert_eq!(ids(&events), vec!["e1", "e3"]);
    }

    #[test]
    fn test_get_events_for_unknown_aggregate_is_empty() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 1, 1));

        assert!(ledger.get_events("missing").is_empty());
    }

    // --- replay ---

    #[test]
    fn test_replay_applies_events_in_timestamp_order() {
        // Arrange
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 100, 1000));
        ledger.append(credit("e1", "acc-1", 100, 1000));
        ledger.append(debit("e2", "acc-1", 30, 900));

        // Act
        let state = ledger.replay("acc-1");

        // Assert
        assert_eq!(state.balance, 70.0);
        let applied: Vec<&str> = state.transaction_ids().map(EventId::as_str).collect();
        assert_eq!(applied, vec!["e2", "e1"]);
    }

    #[test]
    fn test_replay_skips_unrecognized_types() {
        let mut ledger = EventLedger::new();
        ledger.append(unrecognized("e0", "acc-1", "ACCOUNT_OPENED", 1));
        ledger.append(credit("e1", "acc-1", 50, 2));

        let state = ledger.replay("acc-1");

        assert_eq!(state.balance, 50.0);
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(ledger.get_events("acc-1").len(), 2);
    }

    #[test]
    fn test_replay_unknown_aggregate_returns_identity_state() {
        let ledger = EventLedger::new();

        let state = ledger.replay("nobody");

        assert_eq!(state, AccountState::default());
    }

    #[test]
    fn test_replay_is_repeatable() {
        let mut ledger = EventLedger::new();
        ledger.append(
            EventBuilder::credit(10)
                .id("e1")
                .aggregate("acc-1")
                .at(5)
                .version(1)
                .build(),
        );
        ledger.append(EventBuilder::debit(3).aggregate("acc-1").at(5).build());

        let first = ledger.replay("acc-1");
        let second = ledger.replay("acc-1");

        assert_eq!(first, second);
        assert_eq!(first.balance, 7.0);
    }

    #[test]
    fn test_replay_as_custom_aggregate() {
        #[derive(Default)]
        struct EventCount(usize);

        impl Aggregate for EventCount {
            fn apply(&mut self, _event: &DomainEvent) {
                self.0 += 1;
            }
        }

        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-1", 1, 1));
        ledger.append(unrecognized("e2", "acc-1", "NOTE", 2));
        ledger.append(credit("e3", "acc-2", 1, 3));

        let count: EventCount = ledger.replay_as("acc-1");

        assert_eq!(count.0, 2);
    }

    // --- bookkeeping ---

    #[test]
    fn test_aggregate_ids_in_first_append_order() {
        let mut ledger = EventLedger::new();
        ledger.append(credit("e1", "acc-2", 1, 1));
        ledger.append(credit("e2", "acc-1", 1, 1));
        ledger.append(credit("e3", "acc-2", 1, 1));

        let aggregate_ids: Vec<&str> = ledger
            .aggregate_ids()
            .into_iter()
            .map(AggregateId::as_str)
            .collect();

        assert_eq!(aggregate_ids, vec!["acc-2", "acc-1"]);
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = EventLedger::new();

        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(!ledger.contains("e1"));
    }
}
