use notes_core::NoteStorage;

use crate::app::{exit_not_found_with_hint, AppContext};
use crate::cli::DeleteArgs;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    // Deleting never decrypts, so no passphrase is needed.
    let store = ctx.open_store()?;

    if !store.delete(&args.id, "")? {
        exit_not_found_with_hint(
            &format!("Note not found: {}", args.id),
            "Hint: Run `notes list` to find note IDs.",
        );
    }

    if !ctx.quiet() {
        println!("Deleted note {}", args.id);
    }
    Ok(())
}
