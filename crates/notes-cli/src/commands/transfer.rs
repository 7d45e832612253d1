use std::io::Write;

use notes_core::storage::codec::from_json_value;
use notes_core::storage::ListOptions;
use notes_core::NoteStorage;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ImportArgs};
use crate::errors::CliError;
use crate::output::{notes_json, print_skipped};

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.file, e))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CliError::invalid_input(format!("Invalid JSON in {}: {}", args.file, e)))?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => {
            return Err(CliError::invalid_input(format!(
                "Expected a JSON array of notes in {}",
                args.file
            ))
            .into())
        }
    };

    let mut notes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let note = from_json_value(item).map_err(|e| {
            CliError::invalid_input(format!("Note #{} in {}: {}", index + 1, args.file, e))
        })?;
        notes.push(note);
    }

    let (store, passphrase) = ctx.open_with_passphrase()?;
    store.save_batch(&notes, &passphrase)?;

    if !ctx.quiet() {
        println!("Imported {} note(s)", notes.len());
    }
    Ok(())
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;
    let report = store.list_with_report(&ListOptions::new(), &passphrase)?;
    print_skipped(&report.skipped);

    let output = serde_json::to_string_pretty(&notes_json(&report.notes))?;
    match args.output.as_deref() {
        Some(path) => {
            std::fs::write(path, format!("{}\n", output))
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
            if !ctx.quiet() {
                println!("Exported {} note(s) to {}", report.notes.len(), path);
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", output)?;
        }
    }
    Ok(())
}
