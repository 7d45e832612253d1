//! Cryptographic operations for Notes.
//!
//! Every stored record is an independent envelope:
//!
//! ```text
//! salt (16) || nonce (12) || ciphertext (n) || tag (16)
//! ```
//!
//! base64-encoded for a text-safe file body.
//!
//! - **PBKDF2-HMAC-SHA256** (100,000 iterations) turns the password and the
//!   per-envelope salt into a 256-bit key
//! - **AES-256-GCM** with no associated data encrypts and authenticates
//! - A fresh salt and nonce are drawn for every encryption, so rewriting the
//!   same plaintext never repeats a key or ciphertext
//!
//! Keys are derived per call and zeroized on drop; nothing is cached.

pub mod envelope;
pub mod kdf;

pub use envelope::{decrypt, encrypt, Envelope};
pub use kdf::{derive_key, DerivedKey, PBKDF2_ITERATIONS};

/// Size of the AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the per-envelope salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of the GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Smallest valid envelope (empty ciphertext)
pub const MIN_ENVELOPE_SIZE: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;
