//! Error types for the secure store.

use thiserror::Error;

/// Result type for secure store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the secure store primitives.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or storage backend failure.
    #[error("io error: {context}")]
    Io {
        /// What the store was doing when the error occurred.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization failures.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Passphrase key stretching failure (invalid parameters or output).
    #[error("kdf error: {0}")]
    Kdf(String),

    /// AEAD open failed: wrong passphrase or tampered record.
    #[error("decryption failed - possibly wrong password")]
    DecryptFailed,

    /// AEAD seal failed.
    #[error("encryption failed: {0}")]
    EncryptFailed(String),

    /// The persisted record carries a version this build cannot read.
    #[error("unsupported record version: {0}")]
    UnsupportedVersion(u16),

    /// The persisted record is structurally invalid.
    #[error("corrupted record: {0}")]
    Corrupted(String),

    /// No record is persisted under the requested name.
    #[error("no record persisted under \"{0}\"")]
    NotFound(String),
}

impl StoreError {
    /// Creates an [`StoreError::Io`] from a context string and source error.
    #[must_use]
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
