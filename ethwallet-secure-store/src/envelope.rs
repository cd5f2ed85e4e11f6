//! Versioned record envelope.
//!
//! Everything needed to open a record later — KDF parameters, salt, nonce
//! and ciphertext — travels in one CBOR-encoded envelope. The version tag
//! allows the encryption scheme to migrate without guessing at the layout
//! of old records.

use serde::{Deserialize, Serialize};

use crate::crypto::NONCE_SIZE;
use crate::error::{StoreError, StoreResult};
use crate::kdf::{KdfParams, SALT_SIZE};

/// Current envelope format version.
pub const RECORD_VERSION: u16 = 1;

/// The persisted form of an encrypted record.
#[derive(Clone, Serialize, Deserialize)]
pub struct RecordEnvelope {
    /// Format version for migration support.
    pub version: u16,
    /// scrypt parameters the record key was derived with.
    pub kdf: KdfParams,
    /// Random salt fed to the KDF.
    pub salt: Vec<u8>,
    /// AEAD nonce.
    pub nonce: Vec<u8>,
    /// Sealed payload, including the auth tag.
    pub ciphertext: Vec<u8>,
}

impl RecordEnvelope {
    /// Packs the outputs of KDF + sealing into a current-version envelope.
    #[must_use]
    pub fn new(kdf: KdfParams, salt: [u8; SALT_SIZE], nonce: [u8; NONCE_SIZE], ciphertext: Vec<u8>) -> Self {
        Self {
            version: RECORD_VERSION,
            kdf,
            salt: salt.to_vec(),
            nonce: nonce.to_vec(),
            ciphertext,
        }
    }

    /// Encodes the envelope to CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if encoding fails.
    pub fn serialize(&self) -> StoreResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        Ok(bytes)
    }

    /// Decodes an envelope from CBOR bytes, checking the version tag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] for malformed CBOR and
    /// [`StoreError::UnsupportedVersion`] for a version this build cannot
    /// read.
    pub fn deserialize(bytes: &[u8]) -> StoreResult<Self> {
        let envelope: Self = ciborium::de::from_reader(bytes)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        if envelope.version != RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion(envelope.version));
        }
        Ok(envelope)
    }

    /// Returns the nonce as a fixed-size array.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] if the stored nonce has the wrong
    /// length.
    pub fn nonce_array(&self) -> StoreResult<[u8; NONCE_SIZE]> {
        self.nonce
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Corrupted(format!("nonce length {}", self.nonce.len())))
    }
}
