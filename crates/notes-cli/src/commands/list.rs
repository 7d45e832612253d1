use notes_core::storage::ListOptions;
use notes_core::NoteStorage;

use crate::app::AppContext;
use crate::cli::{ListArgs, RangeArgs};
use crate::errors::CliError;
use crate::helpers::{parse_datetime, parse_range_end};
use crate::output::{print_notes_json, print_notes_table, print_skipped};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let mut options = ListOptions::new();
    if let Some(since) = args.since.as_deref() {
        options = options.start_date(parse_datetime(since)?);
    }
    if let Some(until) = args.until.as_deref() {
        options = options.end_date(parse_range_end(until)?);
    }
    if args.tasks {
        options = options.is_task(true);
    } else if args.notes_only {
        options = options.is_task(false);
    }
    if let Some(limit) = args.limit.or(ctx.default_limit()) {
        options = options.limit(limit);
    }
    if let Some(offset) = args.offset {
        options = options.offset(offset);
    }

    let (store, passphrase) = ctx.open_with_passphrase()?;
    let report = store.list_with_report(&options, &passphrase)?;
    print_skipped(&report.skipped);

    if args.json {
        print_notes_json(&report.notes)?;
    } else {
        print_notes_table(&report.notes, ctx.quiet());
    }
    Ok(())
}

pub fn handle_range(ctx: &AppContext, args: &RangeArgs) -> anyhow::Result<()> {
    let start = parse_datetime(&args.start)?;
    let end = parse_range_end(&args.end)?;
    if end < start {
        CliError::invalid_input(format!(
            "Range end {} is before start {}",
            args.end, args.start
        ))
        .exit();
    }

    let (store, passphrase) = ctx.open_with_passphrase()?;
    let notes = store.list_by_date_range(start, end, &passphrase)?;

    if args.json {
        print_notes_json(&notes)?;
    } else {
        print_notes_table(&notes, ctx.quiet());
    }
    Ok(())
}
