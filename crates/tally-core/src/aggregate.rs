//! Aggregate fold abstraction.

use crate::event::DomainEvent;

/// State derived entirely from an ordered event history.
///
/// `Default` is the identity state replay starts from.
pub trait Aggregate: Default {
    /// Folds a single event into the state. Must be total: events the
    /// aggregate does not understand leave it unchanged.
    fn apply(&mut self, event: &DomainEvent);

    /// Folds an ordered sequence of events, starting from the identity state.
    fn fold<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a DomainEvent>,
    {
        events.into_iter().fold(Self::default(), |mut state, event| {
            state.apply(event);
            state
        })
    }
}
