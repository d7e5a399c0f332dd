//! Per-aggregate replay report.

use serde::Serialize;
use tally_core::account::AccountState;
use tally_core::event::{Amount, EventId};

/// Replayed state of one aggregate, as written to the output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport<'a> {
    /// The aggregate that was replayed.
    pub aggregate_id: &'a str,
    /// Final balance.
    pub balance: Amount,
    /// Ids of the folded events, in fold order.
    pub transactions: Vec<&'a EventId>,
}

impl<'a> AccountReport<'a> {
    /// Summarizes a replayed state.
    #[must_use]
    pub fn new(aggregate_id: &'a str, state: &'a AccountState) -> Self {
        Self {
            aggregate_id,
            balance: state.balance,
            transactions: state.transaction_ids().collect(),
        }
    }
}
