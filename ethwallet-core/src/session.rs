//! Login session state machine.
//!
//! [`WalletSession`] ties the mnemonic input buffer, the passphrase and the
//! encrypted store together into the unlock flow: a single `login` call
//! either decrypts an existing wallet or derives and saves a new one, and a
//! `logout` call wipes the persisted record.

use std::mem;
use std::sync::Arc;

use ethwallet_secure_store::{BlobStore, KdfParams};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::account::AccountSet;
use crate::derivation::derive_accounts;
use crate::error::WalletError;
use crate::mnemonic::MnemonicWords;
use crate::wallet::WalletStore;

/// Callback fired once after a successful unlock, with the decrypted
/// account set. Implementations must be cheap; they run inline on the
/// login path.
pub trait UnlockObserver: Send + Sync {
    /// Called exactly once per successful `login`.
    fn on_unlock(&self, accounts: &AccountSet);
}

/// What to wipe from the input buffers when a login attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPolicy {
    /// Drop only the passphrase; the typed words stay for correction.
    #[default]
    ClearPassphrase,
    /// Drop the passphrase and the typed words.
    ClearMnemonic,
}

/// Mnemonic entry, passphrase and store, driven through login and logout.
pub struct WalletSession<S: BlobStore> {
    store: WalletStore<S>,
    words: MnemonicWords,
    passphrase: SecretString,
    policy: RecoveryPolicy,
    observer: Option<Arc<dyn UnlockObserver>>,
}

impl<S: BlobStore> WalletSession<S> {
    /// Creates a session over `blob_store` with empty inputs.
    #[must_use]
    pub fn new(blob_store: S) -> Self {
        Self::from_store(WalletStore::new(blob_store))
    }

    /// Creates a session with explicit KDF parameters for new records.
    #[must_use]
    pub fn with_kdf_params(blob_store: S, kdf: KdfParams) -> Self {
        Self::from_store(WalletStore::with_kdf_params(blob_store, kdf))
    }

    fn from_store(store: WalletStore<S>) -> Self {
        Self {
            store,
            words: MnemonicWords::new(),
            passphrase: SecretString::from(String::new()),
            policy: RecoveryPolicy::default(),
            observer: None,
        }
    }

    /// Sets the failure recovery policy.
    #[must_use]
    pub const fn with_recovery_policy(mut self, policy: RecoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers the observer fired after each successful unlock.
    #[must_use]
    pub fn with_unlock_observer(mut self, observer: Arc<dyn UnlockObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The mnemonic input buffer.
    #[must_use]
    pub const fn words(&self) -> &MnemonicWords {
        &self.words
    }

    /// Mutable access to the mnemonic input buffer, for typing and paste.
    pub const fn words_mut(&mut self) -> &mut MnemonicWords {
        &mut self.words
    }

    /// Sets the passphrase used for the next `login`.
    pub fn set_passphrase(&mut self, passphrase: impl Into<String>) {
        self.passphrase = SecretString::from(passphrase.into());
    }

    /// The underlying wallet store.
    #[must_use]
    pub const fn store(&self) -> &WalletStore<S> {
        &self.store
    }

    /// Whether the session holds decrypted accounts.
    #[must_use]
    pub fn is_logged(&self) -> bool {
        self.store.is_unlocked()
    }

    /// Attempts to unlock the wallet.
    ///
    /// If an encrypted record exists it is decrypted with the passphrase
    /// and the typed words are ignored. Otherwise the typed words are
    /// validated, the ten accounts derived and saved under the passphrase.
    /// The passphrase is consumed either way; on success the word buffer is
    /// wiped and the unlock observer fires once.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::KeyDerivationFailed`] for a wrong passphrase
    /// against an existing record, [`WalletError::InvalidMnemonic`] for a
    /// bad phrase on first-time setup, and [`WalletError::Store`] for
    /// persistence failures. On failure the input buffers are wiped per
    /// the session's [`RecoveryPolicy`].
    pub async fn login(&mut self) -> Result<(), WalletError> {
        let passphrase = mem::replace(&mut self.passphrase, SecretString::from(String::new()));

        let result = if self.store.is_wallet_saved()? {
            debug!("unlocking saved wallet");
            self.store.load(passphrase.expose_secret()).await.map(|_| ())
        } else {
            debug!("no saved wallet, deriving from mnemonic");
            match derive_accounts(&self.words, passphrase.expose_secret()) {
                Ok(accounts) => self
                    .store
                    .save(accounts, passphrase.expose_secret())
                    .await,
                Err(err) => Err(err),
            }
        };

        match result {
            Ok(()) => {
                self.words.clear();
                if let Some(observer) = &self.observer {
                    observer.on_unlock(self.store.accounts());
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                if self.policy == RecoveryPolicy::ClearMnemonic {
                    self.words.clear();
                }
                Err(err)
            }
        }
    }

    /// Deletes the persisted wallet and locks the session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::Store`] if the backing store rejects the
    /// delete.
    pub async fn logout(&mut self) -> Result<(), WalletError> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ethwallet_secure_store::MemoryBlobStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PHRASE: &str =
        "myth like bonus scare over problem client lizard pioneer submit female collect";

    struct CountingObserver {
        fired: AtomicUsize,
        seen: AtomicUsize,
    }

    impl UnlockObserver for CountingObserver {
        fn on_unlock(&self, accounts: &AccountSet) {
            self.fired.fetch_add(1, Ordering::SeqCst);
            self.seen.store(accounts.len(), Ordering::SeqCst);
        }
    }

    // Cheap parameters so the suite is not dominated by scrypt.
    const FAST_KDF: KdfParams = KdfParams::new(4, 8, 1);

    fn session() -> WalletSession<MemoryBlobStore> {
        WalletSession::with_kdf_params(MemoryBlobStore::new(), FAST_KDF)
    }

    #[tokio::test]
    async fn test_first_login_derives_and_saves() {
        let mut session = session();
        session.words_mut().paste_all(PHRASE);
        // The known address for this phrase belongs to the empty
        // passphrase; any other passphrase derives a different set.
        session.set_passphrase("");

        session.login().await.unwrap();
        assert!(session.is_logged());
        assert!(session.store().is_wallet_saved().unwrap());
        assert_eq!(
            session.store().accounts().get(0).unwrap().address(),
            address!("90F8bf6A479f320ead074411a4B0e7944Ea8c9C1")
        );
        // Word buffer is wiped after a successful unlock.
        assert!(session.words().is_empty());
    }

    #[tokio::test]
    async fn test_second_login_ignores_typed_words() {
        let mut session = session();
        session.words_mut().paste_all(PHRASE);
        session.set_passphrase("secret");
        session.login().await.unwrap();
        let expected = session.store().accounts().addresses();

        // Garbage words with the right passphrase still unlock, because the
        // saved record wins once it exists.
        session.words_mut().paste_all("total nonsense here");
        session.set_passphrase("secret");
        session.login().await.unwrap();
        assert_eq!(session.store().accounts().addresses(), expected);
    }

    #[tokio::test]
    async fn test_wrong_passphrase_on_saved_wallet() {
        let mut session = session();
        session.words_mut().paste_all(PHRASE);
        session.set_passphrase("secret");
        session.login().await.unwrap();

        session.set_passphrase("wrong");
        let err = session.login().await.unwrap_err();
        assert!(matches!(err, WalletError::KeyDerivationFailed));
        assert!(session.store().is_wallet_saved().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_mnemonic_keeps_words_by_default() {
        let mut session = session();
        session.words_mut().paste_all("zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo");
        session.set_passphrase("secret");

        let err = session.login().await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidMnemonic));
        assert_eq!(session.words().word(0), Some("zoo"));
        assert!(!session.is_logged());
    }

    #[tokio::test]
    async fn test_clear_mnemonic_policy_wipes_words() {
        let mut session = session().with_recovery_policy(RecoveryPolicy::ClearMnemonic);
        session.words_mut().paste_all("zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo");
        session.set_passphrase("secret");

        session.login().await.unwrap_err();
        assert!(session.words().is_empty());
    }

    #[tokio::test]
    async fn test_observer_fires_once_per_unlock() {
        let observer = Arc::new(CountingObserver {
            fired: AtomicUsize::new(0),
            seen: AtomicUsize::new(0),
        });
        let mut session = session().with_unlock_observer(observer.clone());

        session.words_mut().paste_all(PHRASE);
        session.set_passphrase("secret");
        session.login().await.unwrap();
        assert_eq!(observer.fired.load(Ordering::SeqCst), 1);
        assert_eq!(observer.seen.load(Ordering::SeqCst), 10);

        // A failed attempt does not fire the observer.
        session.set_passphrase("wrong");
        session.login().await.unwrap_err();
        assert_eq!(observer.fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_deletes_record() {
        let mut session = session();
        session.words_mut().paste_all(PHRASE);
        session.set_passphrase("secret");
        session.login().await.unwrap();

        session.logout().await.unwrap();
        assert!(!session.is_logged());
        assert!(!session.store().is_wallet_saved().unwrap());

        // Logged out sessions can set up a fresh wallet again.
        session.words_mut().paste_all(PHRASE);
        session.set_passphrase("other");
        session.login().await.unwrap();
        assert!(session.is_logged());
    }
}
