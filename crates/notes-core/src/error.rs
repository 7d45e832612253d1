//! Error types for Notes core operations.
//!
//! Store operations report failures as `NotesError::Storage`, carrying the
//! underlying cause as the error source. Decryption and record-format failures
//! have their own variants so callers can tell a wrong password from a
//! corrupted file, but they reach `get` callers wrapped in `Storage`.

use std::error::Error as StdError;

use thiserror::Error;

/// Result type alias for Notes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Boxed cause carried by `NotesError::Storage`.
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Core error type for Notes operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Storage failure (I/O, encoding, decryption) with its original cause
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Envelope malformed or authentication tag rejected
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Cipher setup or sealing failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decrypted plaintext is not a valid note record
    #[error("Record format error: {0}")]
    RecordFormat(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NotesError {
    /// Build a `Storage` error wrapping `cause`.
    pub fn storage<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        NotesError::Storage {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    /// Build a `Storage` error with no underlying cause.
    pub fn storage_message(message: impl Into<String>) -> Self {
        NotesError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// True if this error, or any error in its source chain, is a decryption failure.
    pub fn is_decryption_failure(&self) -> bool {
        self.any_in_chain(|err| matches!(err, NotesError::Decryption(_)))
    }

    /// True if this error, or any error in its source chain, is a record format failure.
    pub fn is_record_format_failure(&self) -> bool {
        self.any_in_chain(|err| matches!(err, NotesError::RecordFormat(_)))
    }

    fn any_in_chain(&self, predicate: impl Fn(&NotesError) -> bool) -> bool {
        if predicate(self) {
            return true;
        }
        let mut current = self.source();
        while let Some(err) = current {
            if let Some(notes_err) = err.downcast_ref::<NotesError>() {
                if predicate(notes_err) {
                    return true;
                }
            }
            current = err.source();
        }
        false
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        NotesError::storage(err.to_string(), err)
    }
}
