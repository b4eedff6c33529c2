//! # assetdex-exchange
//!
//! The AssetDex core: an escrow-backed exchange where participants post
//! bids (escrowing native value) and asks (escrowing a transfer
//! approval) against an external multi-token ledger, and authorized
//! operators settle matched pairs.
//!
//! ## Architecture
//!
//! - [`OrderStore`]: append-only arena of every order, keyed by
//!   monotonic id
//! - [`EscrowLedger`]: value held by the venue per still-encumbered bid
//! - [`SettlementEngine`]: validates and executes matched (bid, ask)
//!   pairs, with an optional price-differential refund
//! - [`AccessGate`]: operator check wrapped around the settlement entry
//!   points
//! - [`Exchange`]: the facade exposing the public operation surface
//!
//! ## Operation Flow
//!
//! ```text
//! bid_order/ask_order → OrderStore + EscrowLedger
//! execute_order[_with_refund] → AccessGate → SettlementEngine
//!     → AssetLedger custody transfer + ValueLedger payout
//! cancel_order → OrderStore + EscrowLedger release
//! ```
//!
//! Every batched entry point validates the entire batch before mutating
//! anything, and commits all internal state before the first external
//! ledger call.

pub mod escrow;
pub mod exchange;
pub mod gate;
pub mod order_store;
pub mod settlement;

pub use escrow::EscrowLedger;
pub use exchange::Exchange;
pub use gate::AccessGate;
pub use order_store::OrderStore;
pub use settlement::SettlementEngine;
