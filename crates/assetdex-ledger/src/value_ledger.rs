//! Native value ledger: the value-transfer mechanism of the host
//! environment.
//!
//! Bid escrow flows in through [`ValueLedger::transfer`] at order
//! creation, and payments / refunds flow out through the same seam at
//! settlement and cancellation.

use std::collections::HashMap;

use assetdex_types::{Address, DexError, Result};
use rust_decimal::Decimal;

/// Interface to the native value-transfer mechanism.
pub trait ValueLedger {
    /// Native value balance of `addr`.
    fn balance_of(&self, addr: Address) -> Decimal;

    /// Move `amount` of native value from `from` to `to`.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if `from` holds less than `amount`.
    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()>;
}

/// In-memory native value ledger.
#[derive(Debug, Default)]
pub struct NativeLedger {
    balances: HashMap<Address, Decimal>,
}

impl NativeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `addr`. Test and simulation funding.
    pub fn deposit(&mut self, addr: Address, amount: Decimal) {
        *self.balances.entry(addr).or_default() += amount;
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().copied().sum()
    }
}

impl ValueLedger for NativeLedger {
    fn balance_of(&self, addr: Address) -> Decimal {
        self.balances.get(&addr).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(DexError::InsufficientFunds {
                owner: from,
                requested: amount,
                available,
            });
        }

        *self.balances.entry(from).or_default() -= amount;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }
}
