use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{print_note, print_note_json};

use super::require_note;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;
    let note = require_note(&store, &args.id, &passphrase)?;

    if args.json {
        print_note_json(&note)?;
    } else {
        print_note(&note, ctx.quiet());
    }
    Ok(())
}
