//! Settlement engine: validated execution of matched (bid, ask) pairs.
//!
//! A batch is all-or-nothing. Planning walks every triple and performs
//! every check, including collaborator pre-flight, before a single
//! mutation happens, so a failing triple aborts the call with no state
//! change. Application then commits all internal state (order amounts,
//! active flags, escrow debits) before issuing any external transfer, so
//! a reentrant collaborator can never observe stale escrow or order
//! state.
//!
//! Two pricing paths:
//! - [`SettlementEngine::execute`] pays the seller at the bid price: the
//!   entire escrow slice for the matched quantity goes to the seller.
//! - [`SettlementEngine::execute_with_refund`] pays the seller at their
//!   own ask price and returns the difference to the buyer. An ask
//!   quoting above the bid is rejected rather than clamped, so neither
//!   side settles off their quoted terms.

use std::collections::HashMap;

use assetdex_ledger::{AssetLedger, ValueLedger};
use assetdex_types::{
    Address, AssetRef, DexError, Fill, FillId, OrderId, Result, TokenId,
};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::escrow::EscrowLedger;
use crate::order_store::OrderStore;

/// How the seller's payment is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pricing {
    /// Seller receives `quantity * bid_price`; no refund.
    BidPrice,
    /// Seller receives `quantity * ask_price`; the buyer is refunded
    /// `quantity * (bid_price - ask_price)`.
    AskPriceWithRefund,
}

/// One validated triple, ready to apply.
struct PlannedFill {
    bid: OrderId,
    ask: OrderId,
    asset: AssetRef,
    buyer: Address,
    seller: Address,
    quantity: Decimal,
    unit_price: Decimal,
    payment: Decimal,
    refund: Decimal,
}

/// Executes matched pairs against the order store, the escrow ledger,
/// and the external asset / value ledgers.
#[derive(Debug)]
pub struct SettlementEngine {
    /// The venue's own address: custody holder of escrowed value and the
    /// transfer operator on the asset ledger.
    venue: Address,
    /// Fill sequence counter; each settled triple consumes one value.
    fill_seq: u64,
}

impl SettlementEngine {
    #[must_use]
    pub fn new(venue: Address) -> Self {
        Self { venue, fill_seq: 0 }
    }

    /// Settle matched pairs, paying each seller at the bid's price.
    ///
    /// # Errors
    /// Any validation failure (see [`DexError`] 1xx/3xx/5xx kinds) aborts
    /// the whole batch with no state change.
    #[allow(clippy::too_many_arguments)]
    pub fn execute<L: AssetLedger, V: ValueLedger>(
        &mut self,
        orders: &mut OrderStore,
        escrow: &mut EscrowLedger,
        assets: &mut L,
        value: &mut V,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
    ) -> Result<Vec<Fill>> {
        self.settle(
            orders,
            escrow,
            assets,
            value,
            bid_ids,
            ask_ids,
            amounts,
            Pricing::BidPrice,
        )
    }

    /// Settle matched pairs, paying each seller at their ask price and
    /// refunding the price differential to the buyer.
    ///
    /// # Errors
    /// As [`SettlementEngine::execute`], plus `PriceMismatch` when an ask
    /// quotes above its matched bid.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_with_refund<L: AssetLedger, V: ValueLedger>(
        &mut self,
        orders: &mut OrderStore,
        escrow: &mut EscrowLedger,
        assets: &mut L,
        value: &mut V,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
    ) -> Result<Vec<Fill>> {
        self.settle(
            orders,
            escrow,
            assets,
            value,
            bid_ids,
            ask_ids,
            amounts,
            Pricing::AskPriceWithRefund,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn settle<L: AssetLedger, V: ValueLedger>(
        &mut self,
        orders: &mut OrderStore,
        escrow: &mut EscrowLedger,
        assets: &mut L,
        value: &mut V,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
        pricing: Pricing,
    ) -> Result<Vec<Fill>> {
        let plan = self.plan(orders, escrow, assets, bid_ids, ask_ids, amounts, pricing)?;

        // Effects: every internal mutation lands before any external call.
        for p in &plan {
            let bid = orders.get_mut(p.bid)?;
            bid.remaining -= p.quantity;
            let bid_filled = bid.remaining.is_zero();
            if bid_filled {
                orders.set_inactive(p.bid)?;
            }

            let ask = orders.get_mut(p.ask)?;
            ask.remaining -= p.quantity;
            let ask_filled = ask.remaining.is_zero();
            if ask_filled {
                orders.set_inactive(p.ask)?;
            }

            escrow.debit(p.bid, p.payment + p.refund)?;
        }

        // Interactions: custody transfers and payouts.
        let mut fills = Vec::with_capacity(plan.len());
        for p in plan {
            assets.safe_transfer_from(self.venue, p.seller, p.buyer, p.asset.token, p.quantity)?;
            value.transfer(self.venue, p.seller, p.payment)?;
            if !p.refund.is_zero() {
                value.transfer(self.venue, p.buyer, p.refund)?;
            }

            let fill = Fill {
                id: FillId::deterministic(p.bid, p.ask, self.fill_seq),
                bid_order: p.bid,
                ask_order: p.ask,
                asset: p.asset,
                buyer: p.buyer,
                seller: p.seller,
                quantity: p.quantity,
                unit_price: p.unit_price,
                payment: p.payment,
                refund: p.refund,
                executed_at: Utc::now(),
            };
            self.fill_seq += 1;

            tracing::debug!(
                fill = %fill.id,
                bid = %fill.bid_order,
                ask = %fill.ask_order,
                qty = %fill.quantity,
                payment = %fill.payment,
                refund = %fill.refund,
                "Fill settled"
            );
            fills.push(fill);
        }

        tracing::info!(fills = fills.len(), "Batch settlement complete");
        Ok(fills)
    }

    /// Validate every triple and build the fill plan. Read-only: scratch
    /// maps track quantities, escrow, and seller balances as earlier
    /// triples in the same batch consume them.
    #[allow(clippy::too_many_arguments)]
    fn plan<L: AssetLedger>(
        &self,
        orders: &OrderStore,
        escrow: &EscrowLedger,
        assets: &L,
        bid_ids: &[OrderId],
        ask_ids: &[OrderId],
        amounts: &[Decimal],
        pricing: Pricing,
    ) -> Result<Vec<PlannedFill>> {
        if bid_ids.len() != ask_ids.len() || bid_ids.len() != amounts.len() {
            return Err(DexError::LengthMismatch {
                bids: bid_ids.len(),
                asks: ask_ids.len(),
                amounts: amounts.len(),
            });
        }

        let mut remaining: HashMap<OrderId, Decimal> = HashMap::new();
        let mut escrow_left: HashMap<OrderId, Decimal> = HashMap::new();
        let mut asset_outflow: HashMap<(Address, TokenId), Decimal> = HashMap::new();
        let mut plan = Vec::with_capacity(bid_ids.len());

        for ((&bid_id, &ask_id), &quantity) in bid_ids.iter().zip(ask_ids).zip(amounts) {
            if quantity.is_zero() || quantity.is_sign_negative() {
                return Err(DexError::InvalidAmount {
                    reason: format!("match amount must be positive, got {quantity}"),
                });
            }

            let bid = orders.get(bid_id)?;
            let ask = orders.get(ask_id)?;

            if !bid.is_active {
                return Err(DexError::OrderInactive(bid_id));
            }
            if !ask.is_active {
                return Err(DexError::OrderInactive(ask_id));
            }
            if !bid.is_bid() || ask.is_bid() {
                return Err(DexError::SideMismatch {
                    first: bid_id,
                    second: ask_id,
                });
            }
            if bid.asset != ask.asset {
                return Err(DexError::AssetMismatch {
                    bid_asset: bid.asset,
                    ask_asset: ask.asset,
                });
            }

            let bid_left = remaining.entry(bid_id).or_insert(bid.remaining);
            if quantity > *bid_left {
                return Err(DexError::AmountExceedsOrder {
                    order: bid_id,
                    requested: quantity,
                    remaining: *bid_left,
                });
            }
            *bid_left -= quantity;

            let ask_left = remaining.entry(ask_id).or_insert(ask.remaining);
            if quantity > *ask_left {
                return Err(DexError::AmountExceedsOrder {
                    order: ask_id,
                    requested: quantity,
                    remaining: *ask_left,
                });
            }
            *ask_left -= quantity;

            let (unit_price, refund) = match pricing {
                Pricing::BidPrice => (bid.price, Decimal::ZERO),
                Pricing::AskPriceWithRefund => {
                    if ask.price > bid.price {
                        return Err(DexError::PriceMismatch {
                            bid_price: bid.price,
                            ask_price: ask.price,
                        });
                    }
                    let refund = quantity
                        .checked_mul(bid.price - ask.price)
                        .ok_or_else(|| DexError::Internal("refund overflow".into()))?;
                    (ask.price, refund)
                }
            };
            let payment = quantity
                .checked_mul(unit_price)
                .ok_or_else(|| DexError::Internal("payment overflow".into()))?;

            // The escrow cost is always the bid-price slice: payment plus
            // refund sum to quantity * bid_price.
            let escrow_cost = payment + refund;
            let left = escrow_left.entry(bid_id).or_insert_with(|| escrow.held(bid_id));
            if *left < escrow_cost {
                return Err(DexError::Internal(format!(
                    "escrow shortfall for {bid_id}: held {left}, need {escrow_cost}"
                )));
            }
            *left -= escrow_cost;

            // Collaborator pre-flight. Execution is sequential, so these
            // reads still hold when the transfers are issued.
            if !assets.is_approved_for_all(ask.owner, self.venue) {
                return Err(DexError::TransferUnauthorized {
                    owner: ask.owner,
                    operator: self.venue,
                });
            }
            let outflow = asset_outflow.entry((ask.owner, bid.asset.token)).or_default();
            let available = assets.balance_of(ask.owner, bid.asset.token);
            if *outflow + quantity > available {
                return Err(DexError::InsufficientAssetBalance {
                    owner: ask.owner,
                    token: bid.asset.token,
                    requested: *outflow + quantity,
                    available,
                });
            }
            *outflow += quantity;

            plan.push(PlannedFill {
                bid: bid_id,
                ask: ask_id,
                asset: bid.asset,
                buyer: bid.owner,
                seller: ask.owner,
                quantity,
                unit_price,
                payment,
                refund,
            });
        }

        Ok(plan)
    }
}
