//! Text, table and JSON output for notes.

use std::io::IsTerminal;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as ComfyTable};

use notes_core::storage::codec::{format_timestamp, to_json_value};
use notes_core::storage::{NoteRecord, SkippedFile};

const TABLE_TITLE_MAX: usize = 48;

/// Convert notes to a JSON array value in the stored record shape.
pub fn notes_json(notes: &[NoteRecord]) -> serde_json::Value {
    serde_json::Value::Array(notes.iter().map(to_json_value).collect())
}

pub fn print_note_json(note: &NoteRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&to_json_value(note))?);
    Ok(())
}

pub fn print_notes_json(notes: &[NoteRecord]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&notes_json(notes))?);
    Ok(())
}

/// Print a full note.
pub fn print_note(note: &NoteRecord, quiet: bool) {
    if quiet {
        println!("{}", note.content);
        return;
    }

    println!("ID: {}", note.id);
    println!("Title: {}", note.title);
    println!("Created: {}", format_timestamp(&note.created_at));
    if note.updated_at != note.created_at {
        println!("Updated: {}", format_timestamp(&note.updated_at));
    }
    if note.is_task() {
        println!("Status: {}", task_status(note));
        if let Some(metadata) = note.task_metadata() {
            println!("Priority: {}", metadata.priority);
            if !metadata.tags.is_empty() {
                println!("Tags: {}", metadata.tags.join(", "));
            }
            if let Some(due) = metadata.due_date.as_ref() {
                println!("Due: {}", format_timestamp(due));
            }
            if let Some(done) = metadata.completed_at.as_ref() {
                println!("Completed: {}", format_timestamp(done));
            }
        }
    }
    println!();
    println!("{}", note.content);
}

/// Print notes as a table (or one ID per line in quiet mode).
pub fn print_notes_table(notes: &[NoteRecord], quiet: bool) {
    if quiet {
        for note in notes {
            println!("{}", note.id);
        }
        return;
    }
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    let mut table = ComfyTable::new();
    if std::io::stdout().is_terminal() {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(comfy_table::presets::ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Created", "Kind", "Title"]);

    for note in notes {
        table.add_row(vec![
            note.id.clone(),
            note.created_at.format("%Y-%m-%d %H:%M").to_string(),
            kind_label(note).to_string(),
            truncate(&note.title, TABLE_TITLE_MAX),
        ]);
    }

    println!("{}", table);
}

/// Report files a listing left out.
pub fn print_skipped(skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("Skipped {} unreadable note file(s):", skipped.len());
    for file in skipped {
        eprintln!("  {}: {}", file.path.display(), file.reason);
    }
}

fn kind_label(note: &NoteRecord) -> &'static str {
    if note.is_task() {
        task_status(note)
    } else {
        "note"
    }
}

fn task_status(note: &NoteRecord) -> &'static str {
    match note.task_metadata() {
        Some(metadata) if metadata.completed => "done",
        _ => "task",
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use notes_core::storage::TaskMetadata;

    fn note() -> NoteRecord {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        NoteRecord::new("a", "Title", "Body", ts)
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_kind_label() {
        let ts = note().created_at;
        assert_eq!(kind_label(&note()), "note");
        assert_eq!(kind_label(&note().with_task(None)), "task");
        let done = TaskMetadata::new(1).completed_at(ts);
        assert_eq!(kind_label(&note().with_task(Some(done))), "done");
    }

    #[test]
    fn test_notes_json_uses_record_shape() {
        let value = notes_json(&[note().with_task(None)]);
        let first = &value[0];
        assert_eq!(first["id"], "a");
        assert_eq!(first["is_task"], true);
        assert!(first["task_metadata"].is_null());
    }
}
