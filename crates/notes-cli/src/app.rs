//! Application context for the Notes CLI.
//!
//! Combines CLI arguments with the loaded configuration and resolves the
//! store location and passphrase.

use std::io::IsTerminal;
use std::path::PathBuf;

use notes_core::FileStore;

use crate::cli::Cli;
use crate::config::{default_store_path, load_config, NotesConfig};
use crate::errors::CliError;
use crate::helpers::prompt_passphrase;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: NotesConfig,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        Ok(Self {
            cli,
            config: load_config()?,
        })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Resolve the store directory: `--store`/NOTES_PATH, then the config
    /// file, then the XDG data directory.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.as_deref() {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = self.config.store.path.as_deref() {
            return Ok(PathBuf::from(path));
        }
        default_store_path()
    }

    pub fn open_store(&self) -> anyhow::Result<FileStore> {
        let path = self.store_path()?;
        let store = FileStore::open_with(&path, self.config.store_options())?;
        tracing::debug!(path = %path.display(), "Opened store");
        Ok(store)
    }

    /// Open the store and obtain the passphrase.
    pub fn open_with_passphrase(&self) -> anyhow::Result<(FileStore, String)> {
        let store = self.open_store()?;
        let interactive = !self.cli.no_input && std::io::stdin().is_terminal();
        let passphrase = prompt_passphrase(interactive)?;
        Ok((store, passphrase))
    }

    /// Default `list` limit from the config file.
    pub fn default_limit(&self) -> Option<usize> {
        self.config.list.default_limit
    }
}

/// Exit with a not-found error and hint.
pub fn exit_not_found_with_hint(message: &str, hint: &str) -> ! {
    CliError::not_found(message, hint).exit()
}
