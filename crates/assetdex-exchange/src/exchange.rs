//! The exchange facade: the public operation surface.
//!
//! Owns the order store, the escrow ledger, the settlement engine, and
//! the access gate. The external ledgers and the operator registry are
//! collaborators owned elsewhere and borrowed per call.
//!
//! Every batched operation validates the whole batch before mutating
//! anything, so a failing call leaves no partial state behind.

use std::collections::HashSet;

use assetdex_ledger::{AssetLedger, OperatorRegistry, ValueLedger};
use assetdex_types::{
    Address, AssetRef, DexError, Fill, Order, OrderId, OrderSide, Result,
};
use rust_decimal::Decimal;

use crate::escrow::EscrowLedger;
use crate::gate::AccessGate;
use crate::order_store::OrderStore;
use crate::settlement::SettlementEngine;

/// Escrow-backed exchange for multi-token asset positions.
#[derive(Debug)]
pub struct Exchange {
    /// The venue's own address: escrow custodian and transfer operator.
    venue: Address,
    orders: OrderStore,
    escrow: EscrowLedger,
    gate: AccessGate,
    engine: SettlementEngine,
}

impl Exchange {
    #[must_use]
    pub fn new(venue: Address) -> Self {
        Self {
            venue,
            orders: OrderStore::new(),
            escrow: EscrowLedger::new(),
            gate: AccessGate::new(),
            engine: SettlementEngine::new(venue),
        }
    }

    #[must_use]
    pub fn venue(&self) -> Address {
        self.venue
    }

    /// Create a buy order. The caller attaches exactly
    /// `quantity * price` of native value, which moves into venue
    /// custody until settlement or cancellation.
    ///
    /// # Errors
    /// - `InvalidAmount` if `quantity` or `price` is not positive
    /// - `InsufficientValue` if `attached != quantity * price`
    /// - `InsufficientFunds` if the caller cannot cover the attachment
    pub fn bid_order<V: ValueLedger>(
        &mut self,
        value: &mut V,
        caller: Address,
        asset: AssetRef,
        quantity: Decimal,
        price: Decimal,
        attached: Decimal,
    ) -> Result<OrderId> {
        Self::check_positive(quantity, price)?;

        let required = quantity
            .checked_mul(price)
            .ok_or_else(|| DexError::Internal("escrow overflow".into()))?;
        if attached != required {
            return Err(DexError::InsufficientValue { required, attached });
        }

        value.transfer(caller, self.venue, attached)?;
        let id = self
            .orders
            .create(caller, asset, OrderSide::Bid, quantity, price)?;
        self.escrow.capture(id, attached);

        tracing::debug!(
            order = %id,
            owner = %caller,
            asset = %asset,
            qty = %quantity,
            price = %price,
            "Bid order created"
        );
        Ok(id)
    }

    /// Create a sell order. No asset moves now: the caller must already
    /// have approved the venue on the asset's ledger, and custody
    /// transfer is deferred to settlement.
    ///
    /// # Errors
    /// - `InvalidAmount` if `quantity` or `price` is not positive
    /// - `ApprovalMissing` if the venue holds no transfer approval
    pub fn ask_order<L: AssetLedger>(
        &mut self,
        assets: &L,
        caller: Address,
        asset: AssetRef,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderId> {
        Self::check_positive(quantity, price)?;

        if !assets.is_approved_for_all(caller, self.venue) {
            return Err(DexError::ApprovalMissing {
                owner: caller,
                ledger: asset.ledger,
            });
        }

        let id = self
            .orders
            .create(caller, asset, OrderSide::Ask, quantity, price)?;

        tracing::debug!(
            order = %id,
            owner = %caller,
            asset = %asset,
            qty = %quantity,
            price = %price,
            "Ask order created"
        );
        Ok(id)
    }

    /// Settle matched pairs at the bid price. Operator-only.
    ///
    /// # Errors
    /// `Unauthorized` for non-operators; otherwise as
    /// [`SettlementEngine::execute`].
    #[allow(clippy::too_many_arguments)]
    pub fn execute_order<R, L, V>(
        &mut self,
        registry: &R,
        assets: &mut L,
        value: &mut V,
        caller: Address,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
    ) -> Result<Vec<Fill>>
    where
        R: OperatorRegistry,
        L: AssetLedger,
        V: ValueLedger,
    {
        self.gate.authorize(registry, caller)?;
        self.engine.execute(
            &mut self.orders,
            &mut self.escrow,
            assets,
            value,
            bid_ids,
            ask_ids,
            amounts,
        )
    }

    /// Settle matched pairs at the ask price, refunding the price
    /// differential to each buyer. Operator-only.
    ///
    /// # Errors
    /// `Unauthorized` for non-operators; otherwise as
    /// [`SettlementEngine::execute_with_refund`].
    #[allow(clippy::too_many_arguments)]
    pub fn execute_order_with_refund<R, L, V>(
        &mut self,
        registry: &R,
        assets: &mut L,
        value: &mut V,
        caller: Address,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
    ) -> Result<Vec<Fill>>
    where
        R: OperatorRegistry,
        L: AssetLedger,
        V: ValueLedger,
    {
        self.gate.authorize(registry, caller)?;
        self.engine.execute_with_refund(
            &mut self.orders,
            &mut self.escrow,
            assets,
            value,
            bid_ids,
            ask_ids,
            amounts,
        )
    }

    /// Cancel the caller's own orders. Bid escrow flows back to the
    /// caller; asks only flip inactive (their asset never moved). The
    /// whole batch validates before anything changes. Returns the total
    /// value refunded.
    ///
    /// # Errors
    /// - `OrderNotFound` for an unknown id
    /// - `AlreadyInactive` for a closed order or a duplicate id
    /// - `NotOwner` if any order belongs to someone else
    pub fn cancel_order<V: ValueLedger>(
        &mut self,
        value: &mut V,
        caller: Address,
        ids: &[OrderId],
    ) -> Result<Decimal> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            let order = self.orders.get(id)?;
            if order.owner != caller {
                return Err(DexError::NotOwner { order: id, caller });
            }
            if !order.is_active {
                return Err(DexError::AlreadyInactive(id));
            }
            if !seen.insert(id) {
                return Err(DexError::AlreadyInactive(id));
            }
        }

        let mut refunded = Decimal::ZERO;
        for &id in ids {
            let is_bid = self.orders.get(id)?.is_bid();
            self.orders.set_inactive(id)?;
            if is_bid {
                refunded += self.escrow.release(id)?;
            }
            tracing::debug!(order = %id, owner = %caller, "Order cancelled");
        }

        if !refunded.is_zero() {
            value.transfer(self.venue, caller, refunded)?;
        }
        Ok(refunded)
    }

    /// Read-only snapshot of one order. Closed orders remain queryable.
    ///
    /// # Errors
    /// Returns `OrderNotFound` if the id was never allocated.
    pub fn detail_order(&self, id: OrderId) -> Result<&Order> {
        self.orders.get(id)
    }

    /// Number of orders ever accepted.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Value currently escrowed for one order.
    #[must_use]
    pub fn escrow_held(&self, id: OrderId) -> Decimal {
        self.escrow.held(id)
    }

    /// Total value the venue holds in escrow.
    #[must_use]
    pub fn total_escrow(&self) -> Decimal {
        self.escrow.total_held()
    }

    fn check_positive(quantity: Decimal, price: Decimal) -> Result<()> {
        if quantity.is_zero() || quantity.is_sign_negative() {
            return Err(DexError::InvalidAmount {
                reason: format!("order quantity must be positive, got {quantity}"),
            });
        }
        if price.is_zero() || price.is_sign_negative() {
            return Err(DexError::InvalidAmount {
                reason: format!("order price must be positive, got {price}"),
            });
        }
        Ok(())
    }
}
