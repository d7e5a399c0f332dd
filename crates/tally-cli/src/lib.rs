//! Tally replay tool — loads JSON-lines events into a ledger and reports the
//! replayed account state of each aggregate.

pub mod config;
pub mod error;
pub mod input;
pub mod report;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use tally_ledger::EventLedger;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::input::load_events;
use crate::report::AccountReport;

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Events stored in the ledger.
    pub appended: usize,
    /// Events dropped because their `eventId` was already stored.
    pub duplicates: usize,
    /// Lines skipped because they could not be turned into an event.
    pub rejected: usize,
    /// Aggregates written to the output.
    pub reported: usize,
}

/// Opens the configured events file, or standard input when none is set.
///
/// # Errors
///
/// Returns `AppError::OpenInput` if the file cannot be opened.
pub fn open_input(config: &Config) -> Result<Box<dyn BufRead>, AppError> {
    match &config.events_path {
        Some(path) => {
            let file = File::open(path).map_err(|source| AppError::OpenInput {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Reads every event from `reader`, replays the selected aggregates and
/// writes one JSON report per line to `writer`.
///
/// # Errors
///
/// Returns `AppError::Io` if reading or writing fails, or `AppError::Json` if
/// a report cannot be serialized. Malformed input lines are not errors.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    reader: R,
    mut writer: W,
) -> Result<RunSummary, AppError> {
    let mut ledger = EventLedger::new();
    let loaded = load_events(reader, &mut ledger)?;

    let aggregate_ids: Vec<String> = match &config.aggregate_id {
        Some(aggregate_id) => vec![aggregate_id.clone()],
        None => ledger
            .aggregate_ids()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    };

    for aggregate_id in &aggregate_ids {
        let state = ledger.replay(aggregate_id);
        let report = AccountReport::new(aggregate_id, &state);
        serde_json::to_writer(&mut writer, &report)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    let summary = RunSummary {
        appended: loaded.appended,
        duplicates: loaded.duplicates,
        rejected: loaded.rejected,
        reported: aggregate_ids.len(),
    };
    info!(
        appended = summary.appended,
        duplicates = summary.duplicates,
        rejected = summary.rejected,
        reported = summary.reported,
        "replay complete"
    );
    Ok(summary)
}
