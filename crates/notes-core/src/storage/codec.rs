//! JSON codec for note records.
//!
//! The stored document keeps the flat `is_task` / `task_metadata` shape so
//! files stay readable by other clients of the same store. Timestamps are
//! RFC 3339 strings carrying the record's own UTC offset.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use super::types::{NoteKind, NoteRecord, TaskMetadata, Timestamp};
use crate::error::{NotesError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct NoteDocument {
    id: String,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
    divider_position: i64,
    is_task: bool,
    #[serde(default)]
    task_metadata: Option<TaskDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    priority: i64,
    tags: Vec<String>,
    #[serde(default)]
    due_date: Option<String>,
    completed: bool,
    #[serde(default)]
    completed_at: Option<String>,
}

/// Format a timestamp the way it is stored.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a stored timestamp; `field` names the field in error messages.
pub fn parse_timestamp(field: &str, value: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        NotesError::RecordFormat(format!("Invalid {} timestamp {:?}: {}", field, value, e))
    })
}

/// Encode a record as a JSON value.
pub fn to_json_value(record: &NoteRecord) -> serde_json::Value {
    // Serializing plain strings, integers and booleans into a Value cannot fail.
    serde_json::to_value(NoteDocument::from(record)).unwrap_or(serde_json::Value::Null)
}

/// Decode a record from a JSON value.
pub fn from_json_value(value: serde_json::Value) -> Result<NoteRecord> {
    let document: NoteDocument = serde_json::from_value(value)
        .map_err(|e| NotesError::RecordFormat(format!("Invalid note document: {}", e)))?;
    document.into_record()
}

/// Encode a record as compact JSON text.
pub fn encode(record: &NoteRecord) -> Result<String> {
    serde_json::to_string(&NoteDocument::from(record))
        .map_err(|e| NotesError::RecordFormat(format!("Failed to encode note {}: {}", record.id, e)))
}

/// Decode a record from JSON bytes.
pub fn decode(bytes: &[u8]) -> Result<NoteRecord> {
    let document: NoteDocument = serde_json::from_slice(bytes)
        .map_err(|e| NotesError::RecordFormat(format!("Invalid note document: {}", e)))?;
    document.into_record()
}

impl From<&NoteRecord> for NoteDocument {
    fn from(record: &NoteRecord) -> Self {
        NoteDocument {
            id: record.id.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            created_at: format_timestamp(&record.created_at),
            updated_at: format_timestamp(&record.updated_at),
            divider_position: record.divider_position,
            is_task: record.is_task(),
            task_metadata: record.task_metadata().map(TaskDocument::from),
        }
    }
}

impl From<&TaskMetadata> for TaskDocument {
    fn from(metadata: &TaskMetadata) -> Self {
        TaskDocument {
            priority: metadata.priority,
            tags: metadata.tags.clone(),
            due_date: metadata.due_date.as_ref().map(format_timestamp),
            completed: metadata.completed,
            completed_at: metadata.completed_at.as_ref().map(format_timestamp),
        }
    }
}

impl NoteDocument {
    fn into_record(self) -> Result<NoteRecord> {
        let created_at = parse_timestamp("created_at", &self.created_at)?;
        let updated_at = parse_timestamp("updated_at", &self.updated_at)?;
        let metadata = self
            .task_metadata
            .map(TaskDocument::into_metadata)
            .transpose()?;

        let kind = if self.is_task {
            NoteKind::Task { metadata }
        } else {
            if metadata.is_some() {
                tracing::debug!(note_id = %self.id, "Plain note carries task metadata");
            }
            NoteKind::Plain { metadata }
        };

        Ok(NoteRecord {
            id: self.id,
            title: self.title,
            content: self.content,
            created_at,
            updated_at,
            divider_position: self.divider_position,
            kind,
        })
    }
}

impl TaskDocument {
    fn into_metadata(self) -> Result<TaskMetadata> {
        Ok(TaskMetadata {
            priority: self.priority,
            tags: self.tags,
            due_date: self
                .due_date
                .as_deref()
                .map(|value| parse_timestamp("due_date", value))
                .transpose()?,
            completed: self.completed,
            completed_at: self
                .completed_at
                .as_deref()
                .map(|value| parse_timestamp("completed_at", value))
                .transpose()?,
        })
    }
}
