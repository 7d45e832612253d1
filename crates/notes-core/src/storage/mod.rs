//! Storage abstraction for Notes.
//!
//! This module defines the `NoteStorage` trait, the record model and the
//! file-backed implementation.
//!
//! ## Security
//!
//! Storage engines are responsible for:
//! - Encryption at rest (no plaintext modes)
//! - Per-call key derivation from the caller's password
//! - Atomic writes to prevent torn records

pub mod codec;
pub mod file_store;
pub mod query;
pub mod traits;
pub mod types;

// Re-export public types
pub use file_store::{
    FileStore, ListReport, SkippedFile, StoreOptions, UnreadablePolicy, DEFAULT_EXTENSION,
    NOTES_DIR,
};
pub use query::ListOptions;
pub use traits::NoteStorage;
pub use types::{NoteKind, NotePatch, NoteRecord, TaskMetadata, Timestamp};
