//! Command handlers for the Notes CLI.

mod add;
mod check;
mod delete;
mod edit;
mod list;
mod show;
mod transfer;

pub use add::handle_add;
pub use check::handle_check;
pub use delete::handle_delete;
pub use edit::{handle_done, handle_edit};
pub use list::{handle_list, handle_range};
pub use show::handle_show;
pub use transfer::{handle_export, handle_import};

use notes_core::storage::NoteRecord;
use notes_core::{FileStore, NoteStorage};

use crate::app::exit_not_found_with_hint;

/// Fetch a note or exit with a not-found hint.
fn require_note(store: &FileStore, id: &str, passphrase: &str) -> anyhow::Result<NoteRecord> {
    let note = store.get(id, passphrase)?;
    Ok(note.unwrap_or_else(|| {
        exit_not_found_with_hint(
            &format!("Note not found: {}", id),
            "Hint: Run `notes list` to find note IDs.",
        )
    }))
}
