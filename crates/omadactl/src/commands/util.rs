//! Shared helpers for command handlers.

use std::path::Path;

use futures_util::{StreamExt, TryStreamExt};
use omada_api::{EventFilter, RecordStream};
use serde_json::Value;

use crate::cli::EventFilterArgs;
use crate::error::CliError;

/// Drain a record stream, stopping after `limit` records. Pages past the
/// limit are never requested.
pub async fn collect_limited(
    stream: RecordStream<'_>,
    limit: Option<usize>,
) -> Result<Vec<Value>, CliError> {
    Ok(stream
        .take(limit.unwrap_or(usize::MAX))
        .try_collect()
        .await?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: message.into(),
        })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Parse a time bound given as RFC 3339 or epoch milliseconds.
pub fn parse_time_ms(field: &str, value: &str) -> Result<i64, CliError> {
    if let Ok(ms) = value.parse::<i64>() {
        return Ok(ms);
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|t| t.timestamp_millis())
        .map_err(|e| CliError::Validation {
            field: field.into(),
            reason: format!("expected RFC 3339 or epoch milliseconds: {e}"),
        })
}

/// Translate CLI filter flags into the API filter.
pub fn event_filter(args: &EventFilterArgs) -> Result<EventFilter, CliError> {
    Ok(EventFilter {
        time_start: args
            .since
            .as_deref()
            .map(|s| parse_time_ms("since", s))
            .transpose()?,
        time_end: args
            .until
            .as_deref()
            .map(|s| parse_time_ms("until", s))
            .transpose()?,
        level: args.level,
        module: args.module,
        search_key: args.search.clone(),
    })
}
