//! Encrypted wallet persistence.
//!
//! [`WalletStore`] owns the in-memory account set and the encrypted record
//! behind it. Private keys are the only material persisted; addresses are
//! re-derived from them on load, so a record decrypted with the right
//! passphrase always reproduces the exact account set that was saved.

use ethwallet_secure_store::{BlobStore, KdfParams, SecretVault, StoreError};
use serde::{Deserialize, Serialize};
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::account::AccountSet;
use crate::derivation::account_from_private_key;
use crate::error::WalletError;

/// Record name under which the encrypted wallet is stored.
pub const WALLET_RECORD_NAME: &str = "web3js_wallet";

/// Serialized form of the persisted key material. Only raw private keys go
/// to disk; indices are positional and addresses are recomputed on load.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct KeyMaterial {
    keys: Vec<[u8; 32]>,
}

/// Account set plus its encrypted persistence.
pub struct WalletStore<S: BlobStore> {
    vault: SecretVault<S>,
    accounts: AccountSet,
}

impl<S: BlobStore> WalletStore<S> {
    /// Creates a store over `blob_store` with no accounts loaded.
    #[must_use]
    pub fn new(blob_store: S) -> Self {
        Self {
            vault: SecretVault::new(blob_store),
            accounts: AccountSet::new(),
        }
    }

    /// Creates a store with explicit KDF parameters for new records.
    ///
    /// Tests use relaxed parameters so the suite is not dominated by
    /// key stretching; production callers stick with [`Self::new`].
    #[must_use]
    pub const fn with_kdf_params(blob_store: S, kdf: KdfParams) -> Self {
        Self {
            vault: SecretVault::with_kdf_params(blob_store, kdf),
            accounts: AccountSet::new(),
        }
    }

    /// Whether an encrypted wallet record exists in the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Store`] if the backing store cannot be read.
    pub fn is_wallet_saved(&self) -> Result<bool, WalletError> {
        Ok(self.vault.is_saved(WALLET_RECORD_NAME)?)
    }

    /// The currently held account set. Empty until a save or load succeeds.
    #[must_use]
    pub const fn accounts(&self) -> &AccountSet {
        &self.accounts
    }

    /// Whether the store currently holds decrypted accounts.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// Encrypts `accounts` under `passphrase` and persists them, replacing
    /// any previous record, then adopts them as the current set.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Store`] if serialization or the write fails;
    /// the in-memory set is left unchanged in that case.
    #[allow(clippy::unused_async)]
    pub async fn save(
        &mut self,
        accounts: AccountSet,
        passphrase: &str,
    ) -> Result<(), WalletError> {
        let material = KeyMaterial {
            keys: accounts.iter().map(|a| *a.private_key()).collect(),
        };
        let mut plaintext = Zeroizing::new(Vec::new());
        ciborium::into_writer(&material, &mut *plaintext)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        self.vault
            .save(WALLET_RECORD_NAME, &plaintext, passphrase)?;
        self.accounts = accounts;
        info!(accounts = self.accounts.len(), "wallet saved");
        Ok(())
    }

    /// Decrypts the persisted record with `passphrase` and adopts the
    /// resulting accounts, replacing the current set wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::KeyDerivationFailed`] on a wrong passphrase,
    /// [`WalletError::Store`] if no record exists or it cannot be read, and
    /// [`WalletError::Derivation`] if a stored key is malformed. The
    /// current set is untouched on any failure.
    #[allow(clippy::unused_async)]
    pub async fn load(&mut self, passphrase: &str) -> Result<&AccountSet, WalletError> {
        let plaintext = self.vault.load(WALLET_RECORD_NAME, passphrase)?;
        let material: KeyMaterial = ciborium::from_reader(plaintext.as_slice())
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        let mut accounts = AccountSet::new();
        for (index, key) in (0u32..).zip(material.keys.iter()) {
            accounts.add(account_from_private_key(index, key)?);
        }

        self.accounts = accounts;
        info!(accounts = self.accounts.len(), "wallet loaded");
        Ok(&self.accounts)
    }

    /// Deletes the persisted record and drops the in-memory accounts.
    /// Idempotent when no record exists.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Store`] if the backing store rejects the
    /// delete.
    #[allow(clippy::unused_async)]
    pub async fn clear(&mut self) -> Result<(), WalletError> {
        self.vault.clear(WALLET_RECORD_NAME)?;
        self.accounts.clear();
        info!("wallet cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::derive_accounts;
    use crate::mnemonic::MnemonicWords;
    use ethwallet_secure_store::MemoryBlobStore;

    const PHRASE: &str =
        "myth like bonus scare over problem client lizard pioneer submit female collect";

    // Cheap parameters so the suite is not dominated by scrypt.
    const FAST_KDF: KdfParams = KdfParams::new(4, 8, 1);

    fn fast_store() -> WalletStore<MemoryBlobStore> {
        WalletStore::with_kdf_params(MemoryBlobStore::new(), FAST_KDF)
    }

    fn test_accounts() -> AccountSet {
        let mut words = MnemonicWords::new();
        words.paste_all(PHRASE);
        derive_accounts(&words, "").unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let mut store = fast_store();
        assert!(!store.is_wallet_saved().unwrap());

        let accounts = test_accounts();
        let expected = accounts.addresses();
        store.save(accounts, "hunter2").await.unwrap();
        assert!(store.is_wallet_saved().unwrap());
        assert!(store.is_unlocked());

        let loaded = store.load("hunter2").await.unwrap();
        assert_eq!(loaded.addresses(), expected);
    }

    #[tokio::test]
    async fn test_wrong_passphrase_keeps_record_and_accounts() {
        let mut store = fast_store();
        store.save(test_accounts(), "correct").await.unwrap();

        let err = store.load("wrong").await.unwrap_err();
        assert!(matches!(err, WalletError::KeyDerivationFailed));
        // Failed unlock neither deletes the record nor drops the accounts.
        assert!(store.is_wallet_saved().unwrap());
        assert!(store.is_unlocked());
    }

    #[tokio::test]
    async fn test_load_without_record() {
        let mut store = fast_store();
        let err = store.load("any").await.unwrap_err();
        assert!(matches!(err, WalletError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let mut store = fast_store();
        store.clear().await.unwrap();

        store.save(test_accounts(), "pw").await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.is_wallet_saved().unwrap());
        assert!(!store.is_unlocked());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_record() {
        let mut store = fast_store();
        store.save(test_accounts(), "old").await.unwrap();
        store.save(test_accounts(), "new").await.unwrap();

        assert!(matches!(
            store.load("old").await.unwrap_err(),
            WalletError::KeyDerivationFailed
        ));
        assert!(store.load("new").await.is_ok());
    }

    #[tokio::test]
    async fn test_load_rebuilds_addresses_from_keys() {
        let mut store = fast_store();
        let accounts = test_accounts();
        let expected: Vec<_> = accounts.iter().map(|a| (a.index(), a.address())).collect();
        store.save(accounts, "pw").await.unwrap();

        let loaded = store.load("pw").await.unwrap();
        let rebuilt: Vec<_> = loaded.iter().map(|a| (a.index(), a.address())).collect();
        assert_eq!(rebuilt, expected);
    }
}
