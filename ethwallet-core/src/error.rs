//! Error taxonomy for wallet operations.
//!
//! Every failure a caller can observe is one of these variants; nothing in
//! the crate throws an untyped "anything". The `Display` strings for the
//! two user-facing variants are the exact messages a wallet UI surfaces.

use ethwallet_secure_store::StoreError;
use thiserror::Error;

/// Errors raised by derivation, persistence and session operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The joined phrase fails BIP-39 word-list or checksum validation.
    #[error("Invalid mnemonic")]
    InvalidMnemonic,

    /// A mnemonic slot index outside `0..12` was addressed.
    #[error("word index {index} out of range (0..{max})")]
    WordIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound (always the word count).
        max: usize,
    },

    /// Decrypting the persisted wallet record failed under the supplied
    /// passphrase.
    #[error("Key derivation failed - possibly wrong password")]
    KeyDerivationFailed,

    /// Child-key or address derivation failed below the mnemonic layer.
    #[error("account derivation failed: {0}")]
    Derivation(String),

    /// Underlying secure store failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for WalletError {
    fn from(err: StoreError) -> Self {
        match err {
            // A wrong passphrase surfaces as a key-derivation failure, the
            // same way the unlock flow reports it to the user.
            StoreError::DecryptFailed => Self::KeyDerivationFailed,
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(WalletError::InvalidMnemonic.to_string(), "Invalid mnemonic");
        assert_eq!(
            WalletError::KeyDerivationFailed.to_string(),
            "Key derivation failed - possibly wrong password"
        );
    }

    #[test]
    fn test_decrypt_failed_maps_to_key_derivation_failed() {
        let err = WalletError::from(StoreError::DecryptFailed);
        assert!(matches!(err, WalletError::KeyDerivationFailed));

        let err = WalletError::from(StoreError::UnsupportedVersion(9));
        assert!(matches!(
            err,
            WalletError::Store(StoreError::UnsupportedVersion(9))
        ));
    }
}
