//! AES-256-GCM envelope encryption.
//!
//! An envelope is self-contained: the salt needed to re-derive the key and
//! the nonce travel with the ciphertext. Field boundaries are fixed offsets,
//! which makes this layout the on-disk contract for stored records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};

use super::kdf::{derive_key, DerivedKey};
use super::{MIN_ENVELOPE_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::{NotesError, Result};

/// Parsed envelope fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Salt used for key derivation (unique per encryption)
    pub salt: [u8; SALT_SIZE],
    /// Nonce used for encryption (unique per encryption)
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the authentication tag appended
    pub sealed: Vec<u8>,
}

impl Envelope {
    /// Serialize to `salt || nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + self.sealed.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.sealed);
        bytes
    }

    /// Split raw envelope bytes at the fixed offsets.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            return Err(NotesError::Decryption(format!(
                "Envelope too short: {} bytes (minimum {})",
                bytes.len(),
                MIN_ENVELOPE_SIZE
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[..SALT_SIZE]);
        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);

        Ok(Envelope {
            salt,
            nonce,
            sealed: bytes[SALT_SIZE + NONCE_SIZE..].to_vec(),
        })
    }

    /// Encode as base64 text.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode from base64 text. Surrounding whitespace is ignored.
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| NotesError::Decryption(format!("Invalid base64 envelope: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Length of the ciphertext without the tag.
    pub fn ciphertext_len(&self) -> usize {
        self.sealed.len().saturating_sub(TAG_SIZE)
    }
}

/// Encrypt `plaintext` under `password`, returning a base64 envelope.
///
/// A fresh random salt and nonce are generated per call, so encrypting the
/// same plaintext twice yields unrelated envelopes.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::{decrypt, encrypt};
///
/// let envelope = encrypt(b"secret note", "my-password").unwrap();
/// let plaintext = decrypt(&envelope, "my-password").unwrap();
/// assert_eq!(plaintext, b"secret note");
/// ```
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<String> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_SIZE];
    rng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt);
    let sealed = seal(&key, nonce, plaintext)?;

    Ok(Envelope {
        salt,
        nonce,
        sealed,
    }
    .to_base64())
}

/// Decrypt a base64 envelope with `password`.
///
/// # Errors
///
/// Returns `NotesError::Decryption` if:
/// - The text is not valid base64
/// - The decoded envelope is shorter than salt + nonce + tag
/// - The authentication tag does not verify (wrong password or tampering)
pub fn decrypt(envelope: &str, password: &str) -> Result<Vec<u8>> {
    let envelope = Envelope::from_base64(envelope)?;
    let key = derive_key(password, &envelope.salt);
    open(&key, envelope.nonce, envelope.sealed)
}

fn seal(key: &DerivedKey, nonce: [u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    let unbound_key = UnboundKey::new(&AES_256_GCM, key.as_bytes())
        .map_err(|_| NotesError::Encryption("Failed to create encryption key".to_string()))?;
    let sealing_key = LessSafeKey::new(unbound_key);

    let mut in_out = Vec::with_capacity(plaintext.len() + TAG_SIZE);
    in_out.extend_from_slice(plaintext);

    sealing_key
        .seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce),
            Aad::empty(),
            &mut in_out,
        )
        .map_err(|_| NotesError::Encryption("Encryption failed".to_string()))?;

    Ok(in_out)
}

fn open(key: &DerivedKey, nonce: [u8; NONCE_SIZE], mut sealed: Vec<u8>) -> Result<Vec<u8>> {
    let unbound_key = UnboundKey::new(&AES_256_GCM, key.as_bytes())
        .map_err(|_| NotesError::Decryption("Failed to create decryption key".to_string()))?;
    let opening_key = LessSafeKey::new(unbound_key);

    let plaintext_len = opening_key
        .open_in_place(
            Nonce::assume_unique_for_key(nonce),
            Aad::empty(),
            &mut sealed,
        )
        .map_err(|_| {
            NotesError::Decryption(
                "Authentication failed - wrong password or corrupted data".to_string(),
            )
        })?
        .len();

    sealed.truncate(plaintext_len);
    Ok(sealed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "test-password-123";

    // "secret note" under "correct horse", salt 00..0f, nonce a0..ab, as
    // written by the earlier backend of this store.
    const KNOWN_ENVELOPE: &str =
        "AAECAwQFBgcICQoLDA0OD6ChoqOkpaanqKmqq/F22n9N9uLYOZLUpjquVodLKT5nRXZvWjlp4g==";

    fn tamper(envelope: &str, index: usize) -> String {
        let mut bytes = STANDARD.decode(envelope).unwrap();
        bytes[index] ^= 0x01;
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_encrypt_decrypt() {
        let plaintext = b"Hello, notes!";

        let envelope = encrypt(plaintext, PASSWORD).unwrap();
        let decrypted = decrypt(&envelope, PASSWORD).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_layout_lengths() {
        let plaintext = b"twelve bytes";

        let envelope = encrypt(plaintext, PASSWORD).unwrap();
        let raw = STANDARD.decode(&envelope).unwrap();
        let parsed = Envelope::from_bytes(&raw).unwrap();

        assert_eq!(raw.len(), SALT_SIZE + NONCE_SIZE + plaintext.len() + TAG_SIZE);
        assert_eq!(parsed.ciphertext_len(), plaintext.len());
        assert_eq!(&raw[..SALT_SIZE], &parsed.salt);
        assert_eq!(&raw[SALT_SIZE..SALT_SIZE + NONCE_SIZE], &parsed.nonce);
        assert_eq!(parsed.to_bytes(), raw);
    }

    #[test]
    fn test_same_plaintext_different_envelopes() {
        let plaintext = b"same note";

        let first = encrypt(plaintext, PASSWORD).unwrap();
        let second = encrypt(plaintext, PASSWORD).unwrap();
        assert_ne!(first, second);

        let first = Envelope::from_base64(&first).unwrap();
        let second = Envelope::from_base64(&second).unwrap();
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.nonce, second.nonce);
    }

    #[test]
    fn test_wrong_password_fails() {
        let envelope = encrypt(b"Secret data", PASSWORD).unwrap();

        let result = decrypt(&envelope, "wrong-password");
        assert!(matches!(result, Err(NotesError::Decryption(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let envelope = encrypt(b"Secret data", PASSWORD).unwrap();
        let tampered = tamper(&envelope, SALT_SIZE + NONCE_SIZE);

        assert!(matches!(
            decrypt(&tampered, PASSWORD),
            Err(NotesError::Decryption(_))
        ));
    }

    #[test]
    fn test_tampered_tag_fails() {
        let envelope = encrypt(b"Secret data", PASSWORD).unwrap();
        let len = STANDARD.decode(&envelope).unwrap().len();
        let tampered = tamper(&envelope, len - 1);

        assert!(decrypt(&tampered, PASSWORD).is_err());
    }

    #[test]
    fn test_tampered_salt_fails() {
        let envelope = encrypt(b"Secret data", PASSWORD).unwrap();
        let tampered = tamper(&envelope, 0);

        assert!(decrypt(&tampered, PASSWORD).is_err());
    }

    #[test]
    fn test_empty_plaintext() {
        let envelope = encrypt(b"", PASSWORD).unwrap();
        let raw = STANDARD.decode(&envelope).unwrap();
        assert_eq!(raw.len(), MIN_ENVELOPE_SIZE);

        let decrypted = decrypt(&envelope, PASSWORD).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_short_envelope_rejected() {
        let short = STANDARD.encode([0u8; MIN_ENVELOPE_SIZE - 1]);

        let err = decrypt(&short, PASSWORD).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decrypt("not base64 at all!!", PASSWORD).unwrap_err();
        assert!(matches!(err, NotesError::Decryption(_)));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let envelope = encrypt(b"line", PASSWORD).unwrap();
        let decrypted = decrypt(&format!("{}\n", envelope), PASSWORD).unwrap();
        assert_eq!(decrypted, b"line");
    }

    #[test]
    fn test_known_envelope_decrypts() {
        let envelope = Envelope::from_base64(KNOWN_ENVELOPE).unwrap();
        let expected_salt: Vec<u8> = (0x00..0x10).collect();
        let expected_nonce: Vec<u8> = (0xa0..0xac).collect();

        assert_eq!(envelope.salt.to_vec(), expected_salt);
        assert_eq!(envelope.nonce.to_vec(), expected_nonce);
        assert_eq!(envelope.ciphertext_len(), b"secret note".len());

        let plaintext = decrypt(KNOWN_ENVELOPE, "correct horse").unwrap();
        assert_eq!(plaintext, b"secret note");
        assert!(decrypt(KNOWN_ENVELOPE, "wrong horse").is_err());
    }

    #[test]
    fn test_known_envelope_reproduced_from_fixed_salt_and_nonce() {
        let parsed = Envelope::from_base64(KNOWN_ENVELOPE).unwrap();
        let key = derive_key("correct horse", &parsed.salt);
        let sealed = seal(&key, parsed.nonce, b"secret note").unwrap();

        let rebuilt = Envelope {
            salt: parsed.salt,
            nonce: parsed.nonce,
            sealed,
        };
        assert_eq!(rebuilt.to_base64(), KNOWN_ENVELOPE);
    }
}
