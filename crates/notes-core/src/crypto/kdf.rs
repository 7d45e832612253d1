//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives envelope keys from passwords. The salt is stored in
//! each envelope, so the same password yields a different key for every write.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::ZeroizeOnDrop;

use super::{KEY_SIZE, SALT_SIZE};

/// PBKDF2 iteration count. Part of the stored format: changing it makes
/// existing envelopes unreadable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A symmetric key derived from a password.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a 256-bit key from a password and a 16-byte salt.
///
/// Same password + salt always produces the same key. The empty password is
/// accepted; password policy belongs to the caller.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-password", &salt);
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(password: &str, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    let iterations = NonZeroU32::new(PBKDF2_ITERATIONS).unwrap_or(NonZeroU32::MIN);

    let mut key = [0u8; KEY_SIZE];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password.as_bytes(),
        &mut key,
    );

    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = [1u8; SALT_SIZE];

        let key1 = derive_key("test-password", &salt);
        let key2 = derive_key("test-password", &salt);

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("test-password", &[1u8; SALT_SIZE]);
        let key2 = derive_key("test-password", &[2u8; SALT_SIZE]);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = [3u8; SALT_SIZE];

        let key1 = derive_key("password-one", &salt);
        let key2 = derive_key("password-two", &salt);

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_accepted() {
        let key = derive_key("", &[5u8; SALT_SIZE]);
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-password", &[4u8; SALT_SIZE]);

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
