//! # assetdex-ledger
//!
//! External collaborator interfaces consumed by the AssetDex exchange
//! core, plus in-memory reference implementations used by tests and
//! simulations.
//!
//! The core never owns these systems; it borrows them per call:
//!
//! - [`AssetLedger`]: multi-token balance / approval / custody-transfer
//!   registry. Reference implementation: [`MultiTokenLedger`].
//! - [`ValueLedger`]: native value balances and transfers. Reference
//!   implementation: [`NativeLedger`].
//! - [`OperatorRegistry`]: answers "is this address an authorized
//!   settlement operator?". Reference implementation: [`OperatorSet`].
//!
//! The registries are consulted, never mutated, by the core; their
//! administration (minting, approvals, operator grants) is test and
//! deployment scaffolding.

pub mod asset_ledger;
pub mod operator_registry;
pub mod value_ledger;

pub use asset_ledger::{AssetLedger, MultiTokenLedger};
pub use operator_registry::{OperatorRegistry, OperatorSet};
pub use value_ledger::{NativeLedger, ValueLedger};
