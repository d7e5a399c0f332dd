//! Account balance aggregate.

use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::event::{Amount, DomainEvent, EventId, EventPayload};

/// Balance of an account, rebuilt from its `CREDIT` and `DEBIT` events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountState {
    /// Credits minus debits.
    pub balance: Amount,
    /// Events that were folded into the balance, in application order.
    pub transactions: Vec<DomainEvent>,
}

impl AccountState {
    /// Returns the ids of the folded events, in application order.
    pub fn transaction_ids(&self) -> impl Iterator<Item = &EventId> {
        self.transactions.iter().map(|event| &event.event_id)
    }
}

impl Aggregate for AccountState {
    fn apply(&mut self, event: &DomainEvent) {
        match event.payload {
            EventPayload::Credit { amount } => self.balance += amount,
            EventPayload::Debit { amount } => self.balance -= amount,
            EventPayload::Other { .. } => return,
        }
        self.transactions.push(event.clone());
    }
}
