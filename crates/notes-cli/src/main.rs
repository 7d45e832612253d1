//! Notes CLI - an encrypted, file-backed notes and task store
//!
//! This is the command-line interface for Notes. It wraps the core store
//! with configuration, passphrase handling and human-friendly output.

mod app;
mod cli;
mod commands;
mod config;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;

use notes_core::NotesError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::{classify, CliError};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        if let Some(cli_err) = err.downcast_ref::<NotesError>().and_then(classify) {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli)?;

    match &cli.command {
        Commands::Add(args) => commands::handle_add(&ctx, args),
        Commands::Show(args) => commands::handle_show(&ctx, args),
        Commands::Edit(args) => commands::handle_edit(&ctx, args),
        Commands::Done(args) => commands::handle_done(&ctx, args),
        Commands::Delete(args) => commands::handle_delete(&ctx, args),
        Commands::List(args) => commands::handle_list(&ctx, args),
        Commands::Range(args) => commands::handle_range(&ctx, args),
        Commands::Import(args) => commands::handle_import(&ctx, args),
        Commands::Export(args) => commands::handle_export(&ctx, args),
        Commands::Check => commands::handle_check(&ctx),
    }
}
