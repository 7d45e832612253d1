use notes_core::storage::{NoteKind, NotePatch};
use notes_core::NoteStorage;

use crate::app::AppContext;
use crate::cli::{DoneArgs, EditArgs};
use crate::errors::CliError;
use crate::helpers::{now, task_metadata_from_args};

use super::require_note;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;
    let mut note = require_note(&store, &args.id, &passphrase)?;

    let mut patch = NotePatch::new();
    if let Some(title) = args.title.as_deref() {
        patch = patch.title(title);
    }
    if let Some(body) = args.body.as_deref() {
        patch = patch.content(body);
    }
    if let Some(divider) = args.divider {
        patch = patch.divider_position(divider);
    }
    if args.plain {
        patch = patch.kind(NoteKind::plain());
    } else if args.task.task {
        let base = note.task_metadata().cloned();
        let metadata = task_metadata_from_args(&args.task, base)?;
        patch = patch.kind(NoteKind::Task {
            metadata: Some(metadata),
        });
    }

    if patch.is_empty() {
        CliError::invalid_input("Nothing to change. Pass --title, --body, --divider, --task or --plain.")
            .exit();
    }

    patch.apply_to(&mut note);
    store.save(&note, &passphrase)?;

    if !ctx.quiet() {
        println!("Updated note {}", note.id);
    }
    Ok(())
}

pub fn handle_done(ctx: &AppContext, args: &DoneArgs) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;
    let mut note = require_note(&store, &args.id, &passphrase)?;

    if !note.is_task() {
        CliError::invalid_input(format!("Note {} is not a task", note.id)).exit();
    }

    let completed_at = now();
    let metadata = note
        .task_metadata()
        .cloned()
        .unwrap_or_default()
        .completed_at(completed_at);
    NotePatch::new()
        .kind(NoteKind::Task {
            metadata: Some(metadata),
        })
        .apply_at(&mut note, completed_at);
    store.save(&note, &passphrase)?;

    if !ctx.quiet() {
        println!("Completed task {}", note.id);
    }
    Ok(())
}
