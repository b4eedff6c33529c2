//! Asset references.
//!
//! An [`AssetRef`] names one token class on one external multi-token
//! ledger. Two orders can only match when their references are equal.

use serde::{Deserialize, Serialize};

use crate::{Address, TokenId};

/// A traded position: which ledger holds the token, and which token id
/// inside that ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetRef {
    /// Address of the multi-token ledger contract.
    pub ledger: Address,
    /// Token id inside that ledger.
    pub token: TokenId,
}

impl AssetRef {
    #[must_use]
    pub fn new(ledger: Address, token: TokenId) -> Self {
        Self { ledger, token }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.ledger.short(), self.token.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_refs_compare_equal() {
        let ledger = Address([1u8; 20]);
        let a = AssetRef::new(ledger, TokenId(1));
        let b = AssetRef::new(ledger, TokenId(1));
        assert_eq!(a, b);
        assert_ne!(a, AssetRef::new(ledger, TokenId(2)));
    }

    #[test]
    fn display_shows_ledger_and_token() {
        let asset = AssetRef::new(Address([0xcd; 20]), TokenId(9));
        assert_eq!(format!("{asset}"), "cdcdcdcd#9");
    }

    #[test]
    fn serde_roundtrip() {
        let asset = AssetRef::new(Address([3u8; 20]), TokenId(5));
        let json = serde_json::to_string(&asset).unwrap();
        let back: AssetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }
}
