//! Passphrase-encrypted single-record vault.

use tracing::debug;
use zeroize::Zeroizing;

use crate::blob::BlobStore;
use crate::crypto::{open_record, seal_record};
use crate::envelope::RecordEnvelope;
use crate::error::{StoreError, StoreResult};
use crate::kdf::{generate_salt, KdfParams};

/// Persists and retrieves one encrypted record per name.
///
/// Each `save` derives a fresh record key from the passphrase and a new
/// random salt, seals the payload and atomically overwrites the persisted
/// record. `load` reverses the process using the KDF parameters stored in
/// the record's envelope, so parameter changes never orphan old records.
pub struct SecretVault<S: BlobStore> {
    store: S,
    kdf: KdfParams,
}

impl<S: BlobStore> SecretVault<S> {
    /// Creates a vault over `store` with default KDF parameters.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            kdf: KdfParams::default(),
        }
    }

    /// Creates a vault with explicit KDF parameters for new records.
    #[must_use]
    pub const fn with_kdf_params(store: S, kdf: KdfParams) -> Self {
        Self { store, kdf }
    }

    /// Checks whether a record is persisted under `name`.
    ///
    /// Pure presence probe; no decryption is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend probe fails.
    pub fn is_saved(&self, name: &str) -> StoreResult<bool> {
        self.store.exists(name)
    }

    /// Encrypts `plaintext` under `passphrase` and persists it as `name`,
    /// overwriting any prior record.
    ///
    /// # Errors
    ///
    /// Returns an error if key derivation, sealing, serialization or the
    /// atomic write fails. On error nothing is partially written.
    pub fn save(&self, name: &str, plaintext: &[u8], passphrase: &str) -> StoreResult<()> {
        let salt = generate_salt();
        let key = self.kdf.derive_key(passphrase, &salt)?;
        let (ciphertext, nonce) = seal_record(&key, name, plaintext)?;

        let envelope = RecordEnvelope::new(self.kdf, salt, nonce, ciphertext);
        self.store.write_atomic(name, &envelope.serialize()?)?;

        debug!(record = name, "record sealed and persisted");
        Ok(())
    }

    /// Reads, authenticates and decrypts the record persisted under `name`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no record exists.
    /// - [`StoreError::DecryptFailed`] if the passphrase is wrong or the
    ///   record was tampered with; the persisted record is left untouched.
    /// - [`StoreError::UnsupportedVersion`] / [`StoreError::Corrupted`] for
    ///   records this build cannot interpret.
    pub fn load(&self, name: &str, passphrase: &str) -> StoreResult<Zeroizing<Vec<u8>>> {
        let bytes = self
            .store
            .read(name)?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let envelope = RecordEnvelope::deserialize(&bytes)?;
        let key = envelope.kdf.derive_key(passphrase, &envelope.salt)?;
        let plaintext = open_record(&key, name, &envelope.nonce_array()?, &envelope.ciphertext)?;

        debug!(record = name, "record opened");
        Ok(Zeroizing::new(plaintext))
    }

    /// Removes the record persisted under `name`.
    ///
    /// Idempotent: clearing an absent record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only for actual backend failures.
    pub fn clear(&self, name: &str) -> StoreResult<()> {
        self.store.delete(name)?;
        debug!(record = name, "record cleared");
        Ok(())
    }
}
