//! # Notes Core
//!
//! Core library for Notes - an encrypted, file-backed personal notes and task store.
//!
//! This crate provides the record model, password-based envelope encryption
//! and the file store independent of any outer interface.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation and the AES-256-GCM envelope format
//! - **storage**: record model, record codec, query pipeline and the file store
//! - **fs**: atomic file replacement helpers

pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;

pub use error::{NotesError, Result};
pub use storage::{FileStore, NoteStorage};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
