//! Proptest strategies for event histories.

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use tally_core::event::DomainEvent;

use crate::builder::EventBuilder;

/// Credit/debit histories for one aggregate, in ascending timestamp order.
///
/// Event ids and timestamps are distinct within a history, so the replay
/// result does not depend on the order the events are appended in.
pub fn account_history(
    aggregate_id: &str,
    max_len: usize,
) -> impl Strategy<Value = Vec<DomainEvent>> + use<> {
    let aggregate_id = aggregate_id.to_owned();
    btree_set(0..1_000_000_i64, 0..=max_len)
        .prop_flat_map(|timestamps| {
            let len = timestamps.len();
            (Just(timestamps), vec((any::<bool>(), 0..10_000_i32), len))
        })
        .prop_map(move |(timestamps, entries)| {
            timestamps
                .into_iter()
                .zip(entries)
                .enumerate()
                .map(|(n, (timestamp, (is_credit, amount)))| {
                    let builder = if is_credit {
                        EventBuilder::credit(amount)
                    } else {
                        EventBuilder::debit(amount)
                    };
                    builder
                        .id(&format!("{aggregate_id}-e{n}"))
                        .aggregate(&aggregate_id)
                        .at(timestamp)
                        .version(i64::try_from(n + 1).unwrap_or(i64::MAX))
                        .build()
                })
                .collect()
        })
}

/// Pairs a history with a random permutation of itself.
pub fn shuffled(
    events: Vec<DomainEvent>,
) -> impl Strategy<Value = (Vec<DomainEvent>, Vec<DomainEvent>)> {
    Just(events.clone())
        .prop_shuffle()
        .prop_map(move |permuted| (events.clone(), permuted))
}
