use uuid::Uuid;

use notes_core::storage::NoteRecord;
use notes_core::NoteStorage;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{now, parse_datetime, read_note_body, task_metadata_from_args};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;

    let created_at = match args.date.as_deref() {
        Some(value) => parse_datetime(value)?,
        None => now(),
    };
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let body = read_note_body(&args.body)?;

    let mut note = NoteRecord::new(id, &args.title, body, created_at)
        .with_divider_position(args.divider);
    if args.task.task {
        note = note.with_task(Some(task_metadata_from_args(&args.task, None)?));
    }

    store.save(&note, &passphrase)?;
    tracing::debug!(note_id = %note.id, "Added note");

    if ctx.quiet() {
        println!("{}", note.id);
    } else {
        println!("Added note {}", note.id);
    }
    Ok(())
}
