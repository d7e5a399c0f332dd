//! Tally Ledger — the append-only event log and its replay engine.
//!
//! [`EventLedger`] is single-threaded and carries no locks. Callers that
//! share a ledger across threads go through [`SharedLedger`].

pub mod event_ledger;
pub mod shared_ledger;

pub use event_ledger::{AppendOutcome, EventLedger};
pub use shared_ledger::SharedLedger;
