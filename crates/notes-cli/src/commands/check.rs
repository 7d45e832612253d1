use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let (store, passphrase) = ctx.open_with_passphrase()?;

    if !store.verify_password(&passphrase)? {
        CliError::auth_failed_with_hint(
            "Passphrase does not match stored notes",
            "Hint: Set NOTES_PASSPHRASE to the passphrase used when the notes were saved.",
        )
        .exit();
    }

    if !ctx.quiet() {
        println!("OK: passphrase matches stored notes in {}", store.base_path().display());
    }
    Ok(())
}
