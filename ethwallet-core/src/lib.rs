#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Mnemonic-based Ethereum account derivation and encrypted wallet
//! persistence.
//!
//! The crate covers the key-management flow of a wallet front-end:
//!
//! - [`MnemonicWords`] — an ordered 12-slot word buffer with paste-to-fill.
//! - [`derivation::derive_accounts`] — BIP-39/BIP-44 derivation of ten
//!   accounts along `m/44'/60'/0'/0/{0..9}`.
//! - [`WalletStore`] — the persisted wallet state machine: save the derived
//!   keys encrypted under a passphrase, unlock them later, clear them.
//! - [`WalletSession`] — the login/unlock orchestration handed to a UI
//!   layer, with an explicit recovery policy for invalid-mnemonic failures.
//!
//! Network I/O, transaction signing flows and rendering are out of scope;
//! the produced [`AccountSet`] is what a display/transaction layer consumes.

pub mod account;
pub mod derivation;
pub mod error;
pub mod mnemonic;
pub mod session;
pub mod wallet;

pub use account::{AccountSet, DerivedAccount, ACCOUNT_COUNT};
pub use error::WalletError;
pub use mnemonic::{MnemonicWords, WORD_COUNT};
pub use session::{RecoveryPolicy, UnlockObserver, WalletSession};
pub use wallet::{WalletStore, WALLET_RECORD_NAME};
