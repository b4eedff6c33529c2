//! Escrow ledger: value held by the venue per still-encumbered bid.
//!
//! A bid's attached value is captured here at creation, debited as
//! settlement consumes it, and released in full on cancellation. Asks
//! never appear in this ledger: their escrow is a transfer approval on
//! the external asset ledger, and the asset stays with the owner until
//! settlement.

use std::collections::HashMap;

use assetdex_types::{DexError, OrderId, Result};
use rust_decimal::Decimal;

/// Tracks captured bid value per order id.
#[derive(Debug, Default)]
pub struct EscrowLedger {
    held: HashMap<OrderId, Decimal>,
}

impl EscrowLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` of value taken into custody for `order`.
    pub fn capture(&mut self, order: OrderId, amount: Decimal) {
        let entry = self.held.entry(order).or_default();
        *entry += amount;
    }

    /// Consume `amount` of the capture for `order`. The entry is removed
    /// when it reaches zero.
    ///
    /// # Errors
    /// - `EscrowNotFound` if nothing is held for `order`
    /// - `Internal` if the capture is smaller than `amount` (the exchange
    ///   never debits more than it captured)
    pub fn debit(&mut self, order: OrderId, amount: Decimal) -> Result<()> {
        let held = self
            .held
            .get_mut(&order)
            .ok_or(DexError::EscrowNotFound(order))?;

        if *held < amount {
            return Err(DexError::Internal(format!(
                "escrow shortfall for {order}: held {held}, debit {amount}"
            )));
        }

        *held -= amount;
        if held.is_zero() {
            self.held.remove(&order);
        }
        Ok(())
    }

    /// Remove and return the full remaining capture for `order`.
    ///
    /// # Errors
    /// Returns `EscrowNotFound` if nothing is held for `order`.
    pub fn release(&mut self, order: OrderId) -> Result<Decimal> {
        self.held
            .remove(&order)
            .ok_or(DexError::EscrowNotFound(order))
    }

    /// Value currently held for `order` (zero if none).
    #[must_use]
    pub fn held(&self, order: OrderId) -> Decimal {
        self.held.get(&order).copied().unwrap_or_default()
    }

    /// Total value held across all orders.
    #[must_use]
    pub fn total_held(&self) -> Decimal {
        self.held.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_held() {
        let mut escrow = EscrowLedger::new();
        escrow.capture(OrderId(1), Decimal::new(10000, 0));
        assert_eq!(escrow.held(OrderId(1)), Decimal::new(10000, 0));
        assert_eq!(escrow.held(OrderId(2)), Decimal::ZERO);
        assert_eq!(escrow.total_held(), Decimal::new(10000, 0));
    }

    #[test]
    fn debit_consumes_partially() {
        let mut escrow = EscrowLedger::new();
        escrow.capture(OrderId(1), Decimal::new(1500, 0));
        escrow.debit(OrderId(1), Decimal::new(750, 0)).unwrap();
        assert_eq!(escrow.held(OrderId(1)), Decimal::new(750, 0));
    }

    #[test]
    fn debit_to_zero_removes_entry() {
        let mut escrow = EscrowLedger::new();
        escrow.capture(OrderId(1), Decimal::new(100, 0));
        escrow.debit(OrderId(1), Decimal::new(100, 0)).unwrap();
        assert_eq!(escrow.held(OrderId(1)), Decimal::ZERO);

        let err = escrow.debit(OrderId(1), Decimal::ONE).unwrap_err();
        assert!(matches!(err, DexError::EscrowNotFound(_)));
    }

    #[test]
    fn debit_beyond_capture_is_internal_error() {
        let mut escrow = EscrowLedger::new();
        escrow.capture(OrderId(1), Decimal::new(100, 0));
        let err = escrow.debit(OrderId(1), Decimal::new(101, 0)).unwrap_err();
        assert!(matches!(err, DexError::Internal(_)));
        // Capture unchanged
        assert_eq!(escrow.held(OrderId(1)), Decimal::new(100, 0));
    }

    #[test]
    fn release_returns_remaining_capture() {
        let mut escrow = EscrowLedger::new();
        escrow.capture(OrderId(1), Decimal::new(1500, 0));
        escrow.debit(OrderId(1), Decimal::new(500, 0)).unwrap();

        let released = escrow.release(OrderId(1)).unwrap();
        assert_eq!(released, Decimal::new(1000, 0));
        assert_eq!(escrow.total_held(), Decimal::ZERO);
    }

    #[test]
    fn release_without_capture_fails() {
        let mut escrow = EscrowLedger::new();
        let err = escrow.release(OrderId(9)).unwrap_err();
        assert!(matches!(err, DexError::EscrowNotFound(OrderId(9))));
    }
}
