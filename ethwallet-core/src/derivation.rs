//! Hierarchical-deterministic account derivation.
//!
//! Turns a 12-word phrase and a passphrase into the fixed ten-account set,
//! deriving along the standard Ethereum path `m/44'/60'/0'/0/{index}` so
//! the resulting accounts match `MetaMask`, Ledger and other standard
//! wallets. The curve math and address hashing live in the signer crate;
//! this module only sequences the derivation.

// Loop indices fit in u32 by construction
#![allow(clippy::cast_possible_truncation)]

use alloy_signer_local::{
    coins_bip39::{English, Mnemonic},
    MnemonicBuilder, PrivateKeySigner,
};
use tracing::debug;

use crate::account::{AccountSet, DerivedAccount, ACCOUNT_COUNT};
use crate::error::WalletError;
use crate::mnemonic::MnemonicWords;

/// Fixed BIP-44 derivation path prefix; child indices `0..10` hang off it.
pub const DERIVATION_PATH: &str = "m/44'/60'/0'/0";

/// Derives the ten-account set from `words` and `passphrase`.
///
/// Pure function of its inputs: the same (phrase, passphrase) pair always
/// produces the same accounts in the same order. The passphrase
/// participates in seed generation, so an empty string and a non-empty one
/// yield disjoint account sets.
///
/// # Errors
///
/// Returns [`WalletError::InvalidMnemonic`] if the joined phrase fails
/// BIP-39 word-list or checksum validation; no accounts are created in that
/// case. Lower-level signer failures surface as
/// [`WalletError::Derivation`].
pub fn derive_accounts(
    words: &MnemonicWords,
    passphrase: &str,
) -> Result<AccountSet, WalletError> {
    let phrase = words.phrase();

    // Validate word list and checksum up front so the caller gets the typed
    // failure before any key material exists.
    Mnemonic::<English>::new_from_phrase(&phrase).map_err(|_| WalletError::InvalidMnemonic)?;

    let mut accounts = AccountSet::new();
    for index in 0..ACCOUNT_COUNT {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.as_str())
            .password(passphrase)
            .index(index as u32)
            .map_err(|err| WalletError::Derivation(err.to_string()))?
            .build()
            .map_err(|err| WalletError::Derivation(err.to_string()))?;
        accounts.add(account_from_signer(index as u32, &signer));
    }

    debug!(accounts = accounts.len(), "derived account set from mnemonic");
    Ok(accounts)
}

/// Builds a [`DerivedAccount`] from a signer produced at `index`.
fn account_from_signer(index: u32, signer: &PrivateKeySigner) -> DerivedAccount {
    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(signer.credential().to_bytes().as_slice());
    DerivedAccount::new(index, signer.address(), private_key)
}

/// Reconstructs a [`DerivedAccount`] from a stored private key, re-deriving
/// the address from the key.
///
/// # Errors
///
/// Returns [`WalletError::Derivation`] if the bytes are not a valid
/// secp256k1 private key.
pub(crate) fn account_from_private_key(
    index: u32,
    private_key: &[u8; 32],
) -> Result<DerivedAccount, WalletError> {
    let signer = PrivateKeySigner::from_slice(private_key)
        .map_err(|err| WalletError::Derivation(err.to_string()))?;
    Ok(DerivedAccount::new(index, signer.address(), *private_key))
}
