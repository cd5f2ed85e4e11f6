//! Cryptographic operations for record sealing.
//!
//! This module provides `XChaCha20-Poly1305` AEAD encryption for persisted
//! records. The record name participates in the associated data so a
//! ciphertext cannot be replayed under a different name.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{StoreError, StoreResult};

/// Size of the `XChaCha20-Poly1305` nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Domain separation label mixed into the associated data.
const LABEL_RECORD: &[u8] = b"ethwallet:record";

/// Record encryption key (256-bit), derived from the passphrase.
///
/// # Security
///
/// - The key is zeroized on drop.
/// - The key is never logged or serialized; `Debug` redacts it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RecordKey([u8; 32]);

impl RecordKey {
    /// Key size in bytes.
    pub const SIZE: usize = 32;

    /// Creates a record key from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Constructs associated data for record encryption.
///
/// Format: `"ethwallet:record" || record_name`.
fn build_associated_data(name: &str) -> Vec<u8> {
    let mut aad = Vec::with_capacity(LABEL_RECORD.len() + name.len());
    aad.extend_from_slice(LABEL_RECORD);
    aad.extend_from_slice(name.as_bytes());
    aad
}

/// Generates a random nonce for `XChaCha20-Poly1305`.
///
/// # Panics
///
/// Panics if the system's random number generator fails.
fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce).expect("getrandom failed");
    nonce
}

/// Encrypts a record payload.
///
/// Returns the ciphertext (with auth tag) and the nonce used.
///
/// # Errors
///
/// Returns [`StoreError::EncryptFailed`] if encryption fails, which cannot
/// happen with a well-formed key and nonce.
pub fn seal_record(
    key: &RecordKey,
    name: &str,
    plaintext: &[u8],
) -> StoreResult<(Vec<u8>, [u8; NONCE_SIZE])> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let nonce_bytes = generate_nonce();
    let nonce = XNonce::from_slice(&nonce_bytes);
    let aad = build_associated_data(name);

    let ciphertext = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|_| StoreError::EncryptFailed("`XChaCha20-Poly1305` seal failed".to_string()))?;

    Ok((ciphertext, nonce_bytes))
}

/// Decrypts a record payload.
///
/// # Errors
///
/// Returns [`StoreError::DecryptFailed`] if authentication fails: wrong key
/// (wrong passphrase), tampered ciphertext, or mismatched record name.
pub fn open_record(
    key: &RecordKey,
    name: &str,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> StoreResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let nonce = XNonce::from_slice(nonce);
    let aad = build_associated_data(name);

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| StoreError::DecryptFailed)
}
