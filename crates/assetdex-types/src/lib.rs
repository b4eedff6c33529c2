//! # assetdex-types
//!
//! Shared types and errors for the **AssetDex** exchange core.
//!
//! Every other crate in the workspace depends on this one. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`FillId`], [`Address`], [`TokenId`]
//! - **Asset references**: [`AssetRef`], a (ledger, token id) pair
//! - **Order model**: [`Order`], [`OrderSide`]
//! - **Fill model**: [`Fill`], the immutable settlement record
//! - **Errors**: [`DexError`] with `DEX_ERR_` prefix codes

pub mod asset;
pub mod error;
pub mod fill;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use assetdex_types::{Order, OrderSide, Fill, Address, ...};

pub use asset::*;
pub use error::*;
pub use fill::*;
pub use ids::*;
pub use order::*;
