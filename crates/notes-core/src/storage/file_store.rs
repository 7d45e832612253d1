//! Encrypted one-file-per-note storage backend.
//!
//! Layout:
//!
//! ```text
//! <base_path>/notes/<id>.json    base64 envelope of the record's JSON
//! ```
//!
//! The store holds no keys and no decrypted content between calls. Every
//! read re-reads and re-decrypts from disk and every write goes through a
//! temp file and a rename, so concurrent callers only race at whole-record
//! granularity (last rename wins).

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::{decrypt, encrypt};
use crate::error::{NotesError, Result};
use crate::fs::{is_temp_file, write_atomic};
use crate::storage::codec;
use crate::storage::query::{sort_by_created, ListOptions};
use crate::storage::traits::NoteStorage;
use crate::storage::types::{NoteRecord, Timestamp};

/// Name of the notes directory under the base path.
pub const NOTES_DIR: &str = "notes";

/// Default record file extension.
pub const DEFAULT_EXTENSION: &str = "json";

/// What `list` does with a file it cannot read, decrypt or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreadablePolicy {
    /// Leave the file out of the result and report it
    #[default]
    Skip,
    /// Fail the whole listing
    FailFast,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Record file extension (without the dot)
    pub extension: String,

    /// Handling of unreadable files during listing
    pub unreadable: UnreadablePolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            unreadable: UnreadablePolicy::Skip,
        }
    }
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn unreadable(mut self, policy: UnreadablePolicy) -> Self {
        self.unreadable = policy;
        self
    }
}

/// A file left out of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Listing result together with the files that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ListReport {
    pub notes: Vec<NoteRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// File-backed encrypted note store.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
    notes_dir: PathBuf,
    options: StoreOptions,
}

impl FileStore {
    /// Open a store rooted at `base_path` with default options, creating
    /// the notes directory if needed.
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(base_path, StoreOptions::default())
    }

    /// Open a store rooted at `base_path` with `options`.
    pub fn open_with(base_path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
        let extension = options.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(NotesError::InvalidInput(format!(
                "Invalid record extension: {:?}",
                options.extension
            )));
        }
        let options = StoreOptions {
            extension: extension.to_string(),
            ..options
        };

        let base_path = base_path.as_ref().to_path_buf();
        let notes_dir = base_path.join(NOTES_DIR);
        fs::create_dir_all(&notes_dir).map_err(|e| {
            NotesError::storage(
                format!(
                    "Failed to create notes directory {}: {}",
                    notes_dir.display(),
                    e
                ),
                e,
            )
        })?;

        Ok(Self {
            base_path,
            notes_dir,
            options,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Reject ids that are not a single safe filename component.
    pub fn validate_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(NotesError::InvalidInput(
                "Note id cannot be empty".to_string(),
            ));
        }
        if id == "." || id == ".." {
            return Err(NotesError::InvalidInput(format!(
                "Note id {:?} is reserved",
                id
            )));
        }
        if id.contains(['/', '\\', '\0']) {
            return Err(NotesError::InvalidInput(format!(
                "Note id {:?} contains a path separator",
                id
            )));
        }
        Ok(())
    }

    /// Path of the file holding `id`.
    pub fn note_path(&self, id: &str) -> Result<PathBuf> {
        Self::validate_id(id)?;
        Ok(self
            .notes_dir
            .join(format!("{}.{}", id, self.options.extension)))
    }

    /// Like `list`, but also reports the files that were skipped.
    pub fn list_with_report(&self, options: &ListOptions, password: &str) -> Result<ListReport> {
        let report = self.load_all(password)?;
        Ok(ListReport {
            notes: options.apply(report.notes),
            skipped: report.skipped,
        })
    }

    /// Check `password` against the stored records.
    ///
    /// Returns `Ok(true)` for an empty store or when every record decrypts,
    /// `Ok(false)` as soon as one record fails authentication. Files that
    /// fail for other reasons are ignored.
    pub fn verify_password(&self, password: &str) -> Result<bool> {
        for path in self.record_paths()? {
            match self.read_record(&path, password) {
                Ok(_) => {}
                Err(err) if err.is_decryption_failure() => return Ok(false),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable note");
                }
            }
        }
        Ok(true)
    }

    fn load_all(&self, password: &str) -> Result<ListReport> {
        let mut report = ListReport::default();

        for path in self.record_paths()? {
            match self.read_record(&path, password) {
                Ok(record) => report.notes.push(record),
                Err(NotesError::Storage {
                    source: Some(ref cause),
                    ..
                }) if is_not_found(cause.as_ref()) => {
                    tracing::debug!(path = %path.display(), "Note removed during listing");
                }
                Err(err) => match self.options.unreadable {
                    UnreadablePolicy::Skip => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %err,
                            "Skipping unreadable note"
                        );
                        report.skipped.push(SkippedFile {
                            path,
                            reason: err.to_string(),
                        });
                    }
                    UnreadablePolicy::FailFast => {
                        return Err(NotesError::storage(
                            format!("Failed to list notes: {}: {}", path.display(), err),
                            err,
                        ));
                    }
                },
            }
        }

        if !report.skipped.is_empty() {
            tracing::warn!(
                skipped = report.skipped.len(),
                loaded = report.notes.len(),
                "Listing skipped unreadable notes"
            );
        }

        Ok(report)
    }

    /// Record files in the notes directory, sorted by file name.
    fn record_paths(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.notes_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(NotesError::storage(
                    format!("Failed to list notes: {}", err),
                    err,
                ))
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| NotesError::storage(format!("Failed to list notes: {}", e), e))?;
            let path = entry.path();
            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            let has_extension = path.extension().and_then(|ext| ext.to_str())
                == Some(self.options.extension.as_str());
            if is_file && has_extension && !is_temp_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_record(&self, path: &Path, password: &str) -> Result<NoteRecord> {
        let envelope = fs::read_to_string(path).map_err(|e| {
            NotesError::storage(format!("Failed to read {}: {}", path.display(), e), e)
        })?;
        let plaintext = decrypt(&envelope, password)?;
        codec::decode(&plaintext)
    }
}

fn is_not_found(err: &(dyn std::error::Error + Send + Sync + 'static)) -> bool {
    err.downcast_ref::<io::Error>()
        .map(|io_err| io_err.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl NoteStorage for FileStore {
    fn save(&self, record: &NoteRecord, password: &str) -> Result<()> {
        let path = self.note_path(&record.id)?;

        let json = codec::encode(record).map_err(|e| {
            NotesError::storage(format!("Failed to save note {}: {}", record.id, e), e)
        })?;
        let envelope = encrypt(json.as_bytes(), password).map_err(|e| {
            NotesError::storage(format!("Failed to save note {}: {}", record.id, e), e)
        })?;
        write_atomic(&path, envelope.as_bytes()).map_err(|e| {
            NotesError::storage(format!("Failed to save note {}: {}", record.id, e), e)
        })?;

        tracing::debug!(note_id = %record.id, "Saved note");
        Ok(())
    }

    fn get(&self, id: &str, password: &str) -> Result<Option<NoteRecord>> {
        let path = self.note_path(id)?;

        let envelope = match fs::read_to_string(&path) {
            Ok(envelope) => envelope,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(note_id = %id, "Note not found");
                return Ok(None);
            }
            Err(err) => {
                return Err(NotesError::storage(
                    format!("Failed to retrieve note {}: {}", id, err),
                    err,
                ))
            }
        };

        let record = decrypt(&envelope, password)
            .and_then(|plaintext| codec::decode(&plaintext))
            .map_err(|e| NotesError::storage(format!("Failed to retrieve note {}: {}", id, e), e))?;

        tracing::debug!(note_id = %id, "Loaded note");
        Ok(Some(record))
    }

    fn delete(&self, id: &str, _password: &str) -> Result<bool> {
        let path = self.note_path(id)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(note_id = %id, "Deleted note");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(NotesError::storage(
                format!("Failed to delete note {}: {}", id, err),
                err,
            )),
        }
    }

    fn list(&self, options: &ListOptions, password: &str) -> Result<Vec<NoteRecord>> {
        Ok(self.list_with_report(options, password)?.notes)
    }

    fn save_batch(&self, records: &[NoteRecord], password: &str) -> Result<()> {
        let mut failures = Vec::new();

        for record in records {
            if let Err(err) = self.save(record, password) {
                tracing::warn!(note_id = %record.id, error = %err, "Batch save failed for note");
                failures.push(format!("Note {}: {}", record.id, err));
            }
        }

        if failures.is_empty() {
            tracing::debug!(count = records.len(), "Saved note batch");
            return Ok(());
        }

        Err(NotesError::storage_message(format!(
            "Batch save failed for some notes: {}",
            failures.join("; ")
        )))
    }

    fn list_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
        password: &str,
    ) -> Result<Vec<NoteRecord>> {
        let report = self.load_all(password)?;
        let in_range = |value: &Timestamp| start <= *value && *value <= end;

        let mut seen = HashSet::new();
        let mut records: Vec<NoteRecord> = report
            .notes
            .into_iter()
            .filter(|record| in_range(&record.created_at) || in_range(&record.updated_at))
            .filter(|record| seen.insert(record.id.clone()))
            .collect();

        sort_by_created(&mut records);
        Ok(records)
    }
}
