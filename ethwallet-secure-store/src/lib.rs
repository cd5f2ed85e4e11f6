#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Passphrase-encrypted on-device storage primitives.
//!
//! This crate persists small secret payloads as single opaque records,
//! encrypted under a passphrase-derived key:
//!
//! 1. **KDF** — scrypt stretches the passphrase with a random salt into a
//!    256-bit record key ([`KdfParams`]).
//! 2. **AEAD** — `XChaCha20-Poly1305` seals the payload with a domain
//!    separation label as associated data.
//! 3. **Envelope** — salt, nonce, KDF parameters and ciphertext are packed
//!    into a versioned CBOR [`RecordEnvelope`].
//! 4. **Blob store** — the envelope is written atomically through a
//!    [`BlobStore`] implementation ([`MemoryBlobStore`] or [`FsBlobStore`]).
//!
//! [`SecretVault`] ties the layers together. Decryption failure under a
//! wrong passphrase is a typed [`StoreError::DecryptFailed`], never a panic.

mod blob;
mod crypto;
mod envelope;
mod error;
mod kdf;
mod vault;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use crypto::{RecordKey, NONCE_SIZE};
pub use envelope::{RecordEnvelope, RECORD_VERSION};
pub use error::{StoreError, StoreResult};
pub use kdf::{KdfParams, SALT_SIZE};
pub use vault::SecretVault;
