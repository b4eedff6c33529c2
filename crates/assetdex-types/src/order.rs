//! Order types for the AssetDex exchange core.
//!
//! A bid escrows native value at creation and wants the asset; an ask
//! escrows a transfer approval and wants value. Orders are never deleted:
//! once settled or cancelled they stay queryable with `is_active = false`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, AssetRef, OrderId};

/// Which side of the exchange this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buy order: value escrowed at creation, wants the asset.
    Bid,
    /// Sell order: transfer approval escrowed at creation, wants value.
    Ask,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Ask => write!(f, "ASK"),
        }
    }
}

/// One bid or ask held by the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The participant who submitted the order.
    pub owner: Address,
    /// The traded token class.
    pub asset: AssetRef,
    pub side: OrderSide,
    /// Unit price in native value.
    pub price: Decimal,
    /// Quantity at creation time.
    pub quantity: Decimal,
    /// Unmatched quantity. Decremented by settlement; the order closes
    /// when it reaches zero.
    pub remaining: Decimal,
    /// False once fully settled or cancelled. Transitions true → false
    /// exactly once.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub fn is_bid(&self) -> bool {
        self.side == OrderSide::Bid
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    #[must_use]
    pub fn filled_qty(&self) -> Decimal {
        self.quantity - self.remaining
    }

    /// The value a bid must escrow at creation.
    #[must_use]
    pub fn escrow_required(&self) -> Decimal {
        self.quantity * self.price
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} x {} @ {}",
            self.id, self.side, self.asset, self.remaining, self.price,
        )
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy(side: OrderSide, price: Decimal, qty: Decimal) -> Self {
        Self {
            id: OrderId(1),
            owner: Address::random(),
            asset: AssetRef::new(Address::random(), crate::TokenId(1)),
            side,
            price,
            quantity: qty,
            remaining: qty,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_display() {
        assert_eq!(format!("{}", OrderSide::Bid), "BID");
        assert_eq!(format!("{}", OrderSide::Ask), "ASK");
    }

    #[test]
    fn escrow_required_is_quantity_times_price() {
        let order = Order::dummy(OrderSide::Bid, Decimal::new(100, 0), Decimal::new(100, 0));
        assert_eq!(order.escrow_required(), Decimal::new(10000, 0));
    }

    #[test]
    fn fill_tracking() {
        let mut order = Order::dummy(OrderSide::Ask, Decimal::new(50, 0), Decimal::new(10, 0));
        assert!(!order.is_filled());
        assert_eq!(order.filled_qty(), Decimal::ZERO);
        order.remaining = Decimal::new(4, 0);
        assert_eq!(order.filled_qty(), Decimal::new(6, 0));
        order.remaining = Decimal::ZERO;
        assert!(order.is_filled());
    }

    #[test]
    fn serde_roundtrip() {
        let order = Order::dummy(OrderSide::Bid, Decimal::new(150, 0), Decimal::new(10, 0));
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order.id, back.id);
        assert_eq!(order.price, back.price);
        assert_eq!(order.remaining, back.remaining);
        assert_eq!(order.is_active, back.is_active);
    }
}
