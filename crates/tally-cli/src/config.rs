//! Runtime configuration, read from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Path of a JSON-lines event file. Stdin is read when unset.
pub const EVENTS_PATH_VAR: &str = "TALLY_EVENTS_PATH";
/// Restricts the report to a single aggregate.
pub const AGGREGATE_ID_VAR: &str = "TALLY_AGGREGATE_ID";
/// `json` (default) or `pretty`.
pub const LOG_FORMAT_VAR: &str = "TALLY_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per log record.
    #[default]
    Json,
    /// Human-readable multi-line records.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::Config(format!(
                "{LOG_FORMAT_VAR} must be `json` or `pretty`, got `{other}`"
            ))),
        }
    }
}

/// Replay tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Event input file; `None` means stdin.
    pub events_path: Option<PathBuf>,
    /// Only this aggregate is reported when set.
    pub aggregate_id: Option<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_format = match read(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            events_path: read(EVENTS_PATH_VAR).map(PathBuf::from),
            aggregate_id: read(AGGREGATE_ID_VAR),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (EVENTS_PATH_VAR, "/tmp/events.jsonl"),
            (AGGREGATE_ID_VAR, "acc-1"),
            (LOG_FORMAT_VAR, "Pretty"),
        ]))
        .unwrap();

        assert_eq!(config.events_path, Some(PathBuf::from("/tmp/events.jsonl")));
        assert_eq!(config.aggregate_id.as_deref(), Some("acc-1"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config =
            Config::from_lookup(lookup(&[(EVENTS_PATH_VAR, "  "), (AGGREGATE_ID_VAR, "")])).unwrap();

        assert_eq!(config.events_path, None);
        assert_eq!(config.aggregate_id, None);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let result = Config::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")]));

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("xml")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
