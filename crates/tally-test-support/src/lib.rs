//! Shared test fixtures and strategies for the Tally event ledger.

mod builder;
mod strategy;

pub use builder::{EventBuilder, credit, debit, unrecognized};
pub use strategy::{account_history, shuffled};
