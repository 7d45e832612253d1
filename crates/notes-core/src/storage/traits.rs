//! Storage trait definition.
//!
//! `NoteStorage` is the interface outer layers (HTTP handlers, the CLI)
//! program against. Every call takes the password explicitly: there is no
//! unlocked session and no key cache, and the store never persists or logs
//! the password.

use super::query::ListOptions;
use super::types::{NoteRecord, Timestamp};
use crate::error::Result;

/// Encrypted note storage interface.
///
/// All implementations must ensure:
/// - Records are encrypted at rest
/// - A record replace is atomic (readers never see a partial record)
/// - Concurrent saves of one id resolve as last write wins
///
/// Failures reach callers as `NotesError::Storage`, with one exception: an
/// id that is not a single safe filename component (empty, `.`, `..`, or
/// containing `/`, `\\` or NUL) is rejected up front with
/// `NotesError::InvalidInput`, before any file is touched. This applies to
/// `save`, `get` and `delete`; `save_batch` lists such records among the
/// failures in its `NotesError::Storage`.
pub trait NoteStorage: Send + Sync {
    /// Save a record, replacing any existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::InvalidInput` for an id that is not a safe
    /// filename, and `NotesError::Storage` for encoding or I/O failures.
    fn save(&self, record: &NoteRecord, password: &str) -> Result<()>;

    /// Get a record by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(record))` if found, `Ok(None)` if not found.
    ///
    /// # Errors
    ///
    /// A wrong password or a corrupted file is `NotesError::Storage`, never
    /// `Ok(None)`. An unsafe id is `NotesError::InvalidInput`.
    fn get(&self, id: &str, password: &str) -> Result<Option<NoteRecord>>;

    /// Delete a record by id.
    ///
    /// Returns `true` if a record existed and was removed. The password is
    /// not checked. An unsafe id is `NotesError::InvalidInput`.
    fn delete(&self, id: &str, password: &str) -> Result<bool>;

    /// List records matching `options`, ordered by `created_at` ascending.
    ///
    /// Records that cannot be read are handled by the store's unreadable
    /// policy (skipped by default). With a wrong password this yields an
    /// empty or partial list rather than an error.
    fn list(&self, options: &ListOptions, password: &str) -> Result<Vec<NoteRecord>>;

    /// Save each record independently.
    ///
    /// Not atomic: records saved before a failure stay saved. If any record
    /// fails, a single `NotesError::Storage` names every failed id.
    fn save_batch(&self, records: &[NoteRecord], password: &str) -> Result<()>;

    /// Records created or updated within `[start, end]`, deduplicated by id,
    /// ordered by `created_at` ascending.
    fn list_by_date_range(
        &self,
        start: Timestamp,
        end: Timestamp,
        password: &str,
    ) -> Result<Vec<NoteRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_storage(_storage: &dyn NoteStorage) {}
    }
}
