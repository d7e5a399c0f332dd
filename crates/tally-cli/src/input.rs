//! JSON-lines event input.

use std::io::BufRead;

use tally_core::event::DomainEvent;
use tally_ledger::{AppendOutcome, EventLedger};
use tracing::{debug, warn};

use crate::error::AppError;

/// What happened to the lines of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Events newly stored.
    pub appended: usize,
    /// Events whose `eventId` was already stored.
    pub duplicates: usize,
    /// Lines that were not a valid event.
    pub rejected: usize,
}

/// Appends every event in `reader` to `ledger`, one JSON object per line.
///
/// Blank lines are skipped. A line that does not parse, or whose payload is
/// malformed, is logged and skipped without affecting any other line.
///
/// # Errors
///
/// Returns `AppError::Io` if the reader fails.
pub fn load_events<R: BufRead>(reader: R, ledger: &mut EventLedger) -> Result<LoadSummary, AppError> {
    let mut summary = LoadSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<DomainEvent>(&line) {
            Ok(event) => match ledger.append(event) {
                AppendOutcome::Appended => summary.appended += 1,
                AppendOutcome::Duplicate => summary.duplicates += 1,
            },
            Err(err) => {
                warn!(line = line_number, error = %err, "skipping unreadable event");
                summary.rejected += 1;
            }
        }
    }

    debug!(
        appended = summary.appended,
        duplicates = summary.duplicates,
        rejected = summary.rejected,
        "input loaded"
    );
    Ok(summary)
}
