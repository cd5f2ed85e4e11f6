//! Passphrase key stretching.
//!
//! scrypt turns a passphrase and a random salt into the 256-bit record key
//! used to seal the persisted record. The parameters are stored alongside
//! the ciphertext so a record can always be opened with the parameters it
//! was written with.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::RecordKey;
use crate::error::{StoreError, StoreResult};

/// Size of the random KDF salt in bytes.
pub const SALT_SIZE: usize = 32;

/// scrypt parameters for passphrase key derivation.
///
/// The defaults (`log_n = 15`, `r = 8`, `p = 1`) cost roughly 32 MiB of
/// memory per derivation, enough to make offline guessing expensive while
/// staying interactive on commodity hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Base-2 logarithm of the scrypt cost parameter `N`.
    pub log_n: u8,
    /// Block size parameter `r`.
    pub r: u32,
    /// Parallelization parameter `p`.
    pub p: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            log_n: 15,
            r: 8,
            p: 1,
        }
    }
}

impl KdfParams {
    /// Creates explicit scrypt parameters.
    #[must_use]
    pub const fn new(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }

    /// Stretches `passphrase` with `salt` into a [`RecordKey`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Kdf`] if the parameters are invalid for scrypt.
    pub fn derive_key(&self, passphrase: &str, salt: &[u8]) -> StoreResult<RecordKey> {
        let params = scrypt::Params::new(self.log_n, self.r, self.p, RecordKey::SIZE)
            .map_err(|err| StoreError::Kdf(err.to_string()))?;

        let mut key = Zeroizing::new([0u8; RecordKey::SIZE]);
        scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut *key)
            .map_err(|err| StoreError::Kdf(err.to_string()))?;

        Ok(RecordKey::from_bytes(*key))
    }
}

/// Generates a random KDF salt.
///
/// # Panics
///
/// Panics if the system's random number generator fails.
#[must_use]
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    getrandom::getrandom(&mut salt).expect("getrandom failed");
    salt
}
