//! Error types for the AssetDex exchange core.
//!
//! All errors use the `DEX_ERR_` prefix convention for easy grepping in
//! logs and stable assertion in tests. Error codes are grouped by
//! subsystem:
//! - 1xx: Order errors
//! - 2xx: Escrow / value errors
//! - 3xx: Settlement errors
//! - 4xx: Access control errors
//! - 5xx: External ledger errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, AssetRef, OrderId, TokenId};

/// Central error enum for all AssetDex operations.
#[derive(Debug, Error)]
pub enum DexError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The referenced order id was never allocated.
    #[error("DEX_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Zero or negative quantity / price where a positive value is required.
    #[error("DEX_ERR_101: Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// A settlement leg references an order that is no longer open.
    #[error("DEX_ERR_102: Order is no longer active: {0}")]
    OrderInactive(OrderId),

    /// Cancellation or deactivation of an order that is already closed.
    #[error("DEX_ERR_103: Order already inactive: {0}")]
    AlreadyInactive(OrderId),

    /// Cancellation attempted by someone other than the order's owner.
    #[error("DEX_ERR_104: Caller {caller} does not own {order}")]
    NotOwner { order: OrderId, caller: Address },

    // =================================================================
    // Escrow / Value Errors (2xx)
    // =================================================================
    /// Bid creation where the attached value does not equal the required
    /// escrow (`quantity * price`).
    #[error("DEX_ERR_200: Attached value {attached} does not match required escrow {required}")]
    InsufficientValue { required: Decimal, attached: Decimal },

    /// Escrow release or debit with no matching capture.
    #[error("DEX_ERR_201: No escrow held for {0}")]
    EscrowNotFound(OrderId),

    /// Ask creation without a prior transfer approval for the venue.
    #[error("DEX_ERR_202: Owner {owner} has not approved the venue on ledger {ledger}")]
    ApprovalMissing { owner: Address, ledger: Address },

    // =================================================================
    // Settlement Errors (3xx)
    // =================================================================
    /// Batched settlement with unequal input sequence lengths.
    #[error("DEX_ERR_300: Batch length mismatch: {bids} bids, {asks} asks, {amounts} amounts")]
    LengthMismatch {
        bids: usize,
        asks: usize,
        amounts: usize,
    },

    /// Attempted to match two orders that are not a (bid, ask) pair.
    #[error("DEX_ERR_301: Orders {first} and {second} do not form a bid/ask pair")]
    SideMismatch { first: OrderId, second: OrderId },

    /// The two legs reference different assets.
    #[error("DEX_ERR_302: Asset mismatch: bid is {bid_asset}, ask is {ask_asset}")]
    AssetMismatch {
        bid_asset: AssetRef,
        ask_asset: AssetRef,
    },

    /// Match amount exceeds an order's remaining quantity.
    #[error("DEX_ERR_303: Match amount {requested} exceeds remaining {remaining} on {order}")]
    AmountExceedsOrder {
        order: OrderId,
        requested: Decimal,
        remaining: Decimal,
    },

    /// Refund settlement where the ask quotes above the bid.
    #[error("DEX_ERR_304: Ask price {ask_price} exceeds bid price {bid_price}")]
    PriceMismatch {
        bid_price: Decimal,
        ask_price: Decimal,
    },

    // =================================================================
    // Access Control Errors (4xx)
    // =================================================================
    /// Settlement attempted by a caller the operator registry does not know.
    #[error("DEX_ERR_400: Caller {0} is not a registered operator")]
    Unauthorized(Address),

    // =================================================================
    // External Ledger Errors (5xx)
    // =================================================================
    /// The asset ledger refused a custody transfer: no approval in place.
    #[error("DEX_ERR_500: Operator {operator} is not approved to transfer for {owner}")]
    TransferUnauthorized { owner: Address, operator: Address },

    /// The asset ledger holds less than the requested transfer quantity.
    #[error(
        "DEX_ERR_501: Insufficient balance of {token} for {owner}: requested {requested}, available {available}"
    )]
    InsufficientAssetBalance {
        owner: Address,
        token: TokenId,
        requested: Decimal,
        available: Decimal,
    },

    /// Native value transfer with insufficient balance.
    #[error("DEX_ERR_502: Insufficient funds: {owner} has {available}, needs {requested}")]
    InsufficientFunds {
        owner: Address,
        requested: Decimal,
        available: Decimal,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Invariant breach inside the core. Unreachable while the store and
    /// escrow contracts hold.
    #[error("DEX_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_code() {
        let err = DexError::OrderNotFound(OrderId(3));
        let msg = format!("{err}");
        assert!(msg.starts_with("DEX_ERR_100"), "Got: {msg}");
        assert!(msg.contains("order:3"));
    }

    #[test]
    fn unauthorized_names_the_caller() {
        let caller = Address([9u8; 20]);
        let msg = format!("{}", DexError::Unauthorized(caller));
        assert!(msg.starts_with("DEX_ERR_400"));
        assert!(msg.contains(&caller.to_string()));
    }

    #[test]
    fn insufficient_value_display() {
        let err = DexError::InsufficientValue {
            required: Decimal::new(10000, 0),
            attached: Decimal::new(9999, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("DEX_ERR_200"));
        assert!(msg.contains("10000"));
        assert!(msg.contains("9999"));
    }

    #[test]
    fn distinct_kinds_render_distinct_codes() {
        let not_found = format!("{}", DexError::OrderNotFound(OrderId(1)));
        let unauthorized = format!("{}", DexError::Unauthorized(Address([0u8; 20])));
        let inactive = format!("{}", DexError::OrderInactive(OrderId(1)));
        let already = format!("{}", DexError::AlreadyInactive(OrderId(1)));
        let codes: Vec<&str> = [&not_found, &unauthorized, &inactive, &already]
            .iter()
            .map(|m| &m[..11])
            .collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn all_errors_have_dex_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(DexError::AlreadyInactive(OrderId(1))),
            Box::new(DexError::EscrowNotFound(OrderId(1))),
            Box::new(DexError::LengthMismatch {
                bids: 1,
                asks: 2,
                amounts: 1,
            }),
            Box::new(DexError::PriceMismatch {
                bid_price: Decimal::new(100, 0),
                ask_price: Decimal::new(150, 0),
            }),
            Box::new(DexError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("DEX_ERR_"),
                "Error missing DEX_ERR_ prefix: {msg}"
            );
        }
    }
}
