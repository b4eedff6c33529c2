//! Fill records produced by the settlement engine.
//!
//! A [`Fill`] is the immutable record of one settled (bid, ask) pair:
//! custody of `quantity` tokens moved seller → buyer, `payment` value
//! moved to the seller, and `refund` value (if any) returned to the buyer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, AssetRef, FillId, OrderId};

/// One settled match between a bid and an ask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Deterministic fill identifier (hash of the pair + fill sequence).
    pub id: FillId,
    pub bid_order: OrderId,
    pub ask_order: OrderId,
    pub asset: AssetRef,
    /// The bid owner, who received the tokens.
    pub buyer: Address,
    /// The ask owner, who received the payment.
    pub seller: Address,
    /// Token quantity moved seller → buyer.
    pub quantity: Decimal,
    /// Price per unit the seller was paid at.
    pub unit_price: Decimal,
    /// Value released to the seller.
    pub payment: Decimal,
    /// Value returned to the buyer out of their escrow. Zero unless the
    /// settlement path pays the seller at the ask price.
    pub refund: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl Fill {
    /// Total escrow consumed by this fill (payment + refund).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.payment + self.refund
    }
}

impl std::fmt::Display for Fill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fill[{}] {} x {} @ {} ({} <- {})",
            self.id, self.asset, self.quantity, self.unit_price, self.buyer, self.seller,
        )
    }
}
