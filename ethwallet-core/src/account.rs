//! Derived accounts and the ordered account collection.

use alloy_primitives::Address;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of accounts derived from one mnemonic.
pub const ACCOUNT_COUNT: usize = 10;

/// One account derived from the wallet seed.
///
/// The private key is zeroized on drop and redacted from `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedAccount {
    /// Leaf index under the derivation path, `0..10`.
    #[zeroize(skip)]
    index: u32,
    /// Ethereum address derived from the public key.
    #[zeroize(skip)]
    address: Address,
    /// secp256k1 private key.
    private_key: [u8; 32],
}

impl DerivedAccount {
    /// Creates an account from its derivation index, address and key.
    #[must_use]
    pub const fn new(index: u32, address: Address, private_key: [u8; 32]) -> Self {
        Self {
            index,
            address,
            private_key,
        }
    }

    /// Derivation leaf index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Ethereum address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Raw private key bytes.
    #[must_use]
    pub const fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }
}

impl std::fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("index", &self.index)
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Ordered collection of derived accounts.
///
/// Insertion order is derivation order; the display/transaction layer
/// addresses accounts by position.
#[derive(Debug, Clone, Default)]
pub struct AccountSet {
    accounts: Vec<DerivedAccount>,
}

impl AccountSet {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Appends an account, preserving insertion order.
    pub fn add(&mut self, account: DerivedAccount) {
        self.accounts.push(account);
    }

    /// Returns the account at `index`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DerivedAccount> {
        self.accounts.get(index)
    }

    /// Returns the first account matching `predicate`.
    #[must_use]
    pub fn find<P>(&self, predicate: P) -> Option<&DerivedAccount>
    where
        P: FnMut(&&DerivedAccount) -> bool,
    {
        self.accounts.iter().find(predicate)
    }

    /// Removes every account, zeroizing their keys.
    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    /// Number of accounts held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` when no accounts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterates over the accounts in derivation order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, DerivedAccount> {
        self.accounts.iter()
    }

    /// Collects the addresses in derivation order.
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(DerivedAccount::address).collect()
    }
}

impl<'a> IntoIterator for &'a AccountSet {
    type Item = &'a DerivedAccount;
    type IntoIter = std::slice::Iter<'a, DerivedAccount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample(index: u32) -> DerivedAccount {
        let fill = u8::try_from(index + 1).unwrap();
        DerivedAccount::new(
            index,
            address!("90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"),
            [fill; 32],
        )
    }

    #[test]
    fn test_collection_operations() {
        let mut set = AccountSet::new();
        assert!(set.is_empty());
        assert!(set.get(0).is_none());

        set.add(sample(0));
        set.add(sample(1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().index(), 1);

        let found = set.find(|account| account.index() == 1).unwrap();
        assert_eq!(*found.private_key(), [2u8; 32]);
        assert!(set.find(|account| account.index() == 9).is_none());

        let indices: Vec<u32> = set.iter().map(DerivedAccount::index).collect();
        assert_eq!(indices, vec![0, 1]);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", sample(0));
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("[1, 1"));
    }
}
