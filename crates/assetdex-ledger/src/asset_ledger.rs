//! Multi-token asset ledger: balances, approvals, custody transfers.
//!
//! The exchange core only ever calls the three [`AssetLedger`] methods.
//! [`MultiTokenLedger`] is the in-memory reference implementation with
//! the administration surface (minting, approval grants) tests need.

use std::collections::{HashMap, HashSet};

use assetdex_types::{Address, DexError, Result, TokenId};
use rust_decimal::Decimal;

/// Interface to an external multi-token balance and approval registry.
pub trait AssetLedger {
    /// Balance of `owner` for one token class.
    fn balance_of(&self, owner: Address, token: TokenId) -> Decimal;

    /// Whether `owner` has granted `operator` transfer authority over all
    /// of their tokens.
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

    /// Move `quantity` of `token` from `from` to `to`, on the authority
    /// of `operator`.
    ///
    /// # Errors
    /// - `TransferUnauthorized` unless `operator == from` or `from` has
    ///   approved `operator`
    /// - `InsufficientAssetBalance` if `from` holds less than `quantity`
    fn safe_transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token: TokenId,
        quantity: Decimal,
    ) -> Result<()>;
}

/// In-memory multi-token ledger with per-(owner, token) balances and
/// per-(owner, operator) blanket approvals.
#[derive(Debug, Default)]
pub struct MultiTokenLedger {
    balances: HashMap<(Address, TokenId), Decimal>,
    approvals: HashSet<(Address, Address)>,
}

impl MultiTokenLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `quantity` of `token` to `to`.
    pub fn mint(&mut self, to: Address, token: TokenId, quantity: Decimal) {
        let entry = self.balances.entry((to, token)).or_default();
        *entry += quantity;
    }

    /// Grant or revoke blanket transfer approval from `owner` to `operator`.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.approvals.insert((owner, operator));
        } else {
            self.approvals.remove(&(owner, operator));
        }
    }

    /// Total minted supply of one token class across all owners.
    #[must_use]
    pub fn total_supply(&self, token: TokenId) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, t), _)| *t == token)
            .map(|(_, qty)| *qty)
            .sum()
    }
}

impl AssetLedger for MultiTokenLedger {
    fn balance_of(&self, owner: Address, token: TokenId) -> Decimal {
        self.balances
            .get(&(owner, token))
            .copied()
            .unwrap_or_default()
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.approvals.contains(&(owner, operator))
    }

    fn safe_transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token: TokenId,
        quantity: Decimal,
    ) -> Result<()> {
        if operator != from && !self.is_approved_for_all(from, operator) {
            return Err(DexError::TransferUnauthorized { owner: from, operator });
        }

        let available = self.balance_of(from, token);
        if available < quantity {
            return Err(DexError::InsufficientAssetBalance {
                owner: from,
                token,
                requested: quantity,
                available,
            });
        }

        *self.balances.entry((from, token)).or_default() -= quantity;
        *self.balances.entry((to, token)).or_default() += quantity;
        Ok(())
    }
}
