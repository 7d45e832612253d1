//! Input and parsing helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use chrono::{DateTime, NaiveDate, Utc};
use dialoguer::Password;

use notes_core::storage::{TaskMetadata, Timestamp};

use crate::cli::TaskArgs;

/// Prompt for passphrase, or read from NOTES_PASSPHRASE env var.
///
/// An empty NOTES_PASSPHRASE is treated as unset.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("NOTES_PASSPHRASE") {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No passphrase provided and no TTY available. Set NOTES_PASSPHRASE."
        ));
    }
    Password::new()
        .with_prompt("Passphrase")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))
}

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
///
/// A bare date is taken as midnight UTC. Offsets in full timestamps are kept.
pub fn parse_datetime(value: &str) -> anyhow::Result<Timestamp> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid date value: {}", value))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset());
    }

    Err(anyhow::anyhow!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
}

/// Parse an inclusive end-of-range value. A bare date covers the whole day.
pub fn parse_range_end(value: &str) -> anyhow::Result<Timestamp> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| anyhow::anyhow!("Invalid date value: {}", value))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset());
    }
    parse_datetime(value)
}

pub fn now() -> Timestamp {
    Utc::now().fixed_offset()
}

/// Read the note body from `--body`, or from stdin when it is piped.
pub fn read_note_body(body: &Option<String>) -> anyhow::Result<String> {
    if let Some(body) = body {
        return Ok(body.clone());
    }
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer.trim_end_matches('\n').to_string())
}

/// Build task metadata from CLI flags, starting from `base` when editing.
pub fn task_metadata_from_args(
    args: &TaskArgs,
    base: Option<TaskMetadata>,
) -> anyhow::Result<TaskMetadata> {
    let mut metadata = base.unwrap_or_default();
    if let Some(priority) = args.priority {
        metadata.priority = priority;
    }
    if !args.tags.is_empty() {
        metadata.tags = args.tags.clone();
    }
    if let Some(due) = args.due.as_deref() {
        metadata.due_date = Some(parse_datetime(due)?);
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_rfc3339_keeps_offset() {
        let parsed = parse_datetime("2024-03-01T09:30:00+02:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T09:30:00+02:00");
    }

    #[test]
    fn test_parse_datetime_date_only_is_utc_midnight() {
        let parsed = parse_datetime("2024-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_range_end_covers_day() {
        let end = parse_range_end("2024-03-01").unwrap();
        let late = parse_datetime("2024-03-01T23:59:59Z").unwrap();
        assert!(late <= end);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("2024-13-01").is_err());
    }

    #[test]
    fn test_task_metadata_from_args_merges() {
        let base = TaskMetadata::new(1).with_tags(vec!["home".to_string()]);
        let args = TaskArgs {
            task: true,
            priority: Some(3),
            tags: Vec::new(),
            due: Some("2024-05-01".to_string()),
        };
        let merged = task_metadata_from_args(&args, Some(base)).unwrap();
        assert_eq!(merged.priority, 3);
        assert_eq!(merged.tags, vec!["home".to_string()]);
        assert!(merged.due_date.is_some());
    }
}
