use clap::{Args, Parser, Subcommand};

use notes_core::VERSION;

/// Notes - an encrypted, file-backed notes and task store
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store directory (contains `notes/`)
    #[arg(short, long, global = true, env = "NOTES_PATH")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note
    Add(AddArgs),

    /// Show a note by ID
    Show(ShowArgs),

    /// Edit fields of an existing note
    Edit(EditArgs),

    /// Mark a task as completed
    Done(DoneArgs),

    /// Delete a note by ID
    Delete(DeleteArgs),

    /// List notes
    List(ListArgs),

    /// List notes created or updated within a date range
    Range(RangeArgs),

    /// Import notes from a JSON array file
    Import(ImportArgs),

    /// Export all notes as a JSON array
    Export(ExportArgs),

    /// Check the passphrase against stored notes
    Check,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Note body (overrides stdin)
    #[arg(long)]
    pub body: Option<String>,

    /// Explicit note ID (defaults to a new UUID)
    #[arg(long)]
    pub id: Option<String>,

    /// Set custom creation date/time (ISO-8601 or YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Editor divider position
    #[arg(long, default_value_t = 0)]
    pub divider: i64,

    #[command(flatten)]
    pub task: TaskArgs,
}

/// Task options shared by `add` and `edit`
#[derive(Args, Default)]
pub struct TaskArgs {
    /// Make the note a task
    #[arg(long)]
    pub task: bool,

    /// Task priority
    #[arg(long, requires = "task")]
    pub priority: Option<i64>,

    /// Task tags
    #[arg(short, long = "tag", value_name = "TAG", requires = "task")]
    pub tags: Vec<String>,

    /// Task due date (ISO-8601 or YYYY-MM-DD)
    #[arg(long, requires = "task")]
    pub due: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body
    #[arg(long)]
    pub body: Option<String>,

    /// New divider position
    #[arg(long)]
    pub divider: Option<i64>,

    /// Turn a task back into a plain note, dropping its task details
    #[arg(long, conflicts_with = "task")]
    pub plain: bool,

    #[command(flatten)]
    pub task: TaskArgs,
}

/// Arguments for the `done` command
#[derive(Args)]
pub struct DoneArgs {
    /// Task ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Start date (ISO-8601 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub since: Option<String>,

    /// End date (ISO-8601 or YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub until: Option<String>,

    /// Only tasks
    #[arg(long, conflicts_with = "notes_only")]
    pub tasks: bool,

    /// Only plain notes
    #[arg(long = "notes")]
    pub notes_only: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Skip this many results
    #[arg(long)]
    pub offset: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `range` command
#[derive(Args)]
pub struct RangeArgs {
    /// Start of range (ISO-8601 or YYYY-MM-DD, inclusive)
    #[arg(value_name = "START")]
    pub start: String,

    /// End of range (ISO-8601 or YYYY-MM-DD, inclusive)
    #[arg(value_name = "END")]
    pub end: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// JSON file containing an array of notes
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,
}
