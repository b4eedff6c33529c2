//! Identifiers used throughout AssetDex.
//!
//! Order ids are plain monotonic integers handed out by the order store
//! (the store is append-only, so an id is never reused). Participant and
//! contract identities are 20-byte addresses. Fill ids are derived by
//! hashing so the same fill always gets the same id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Monotonically assigned order identifier. Allocation starts at 1 and an
/// id is never reused; inactive orders stay in the store for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Identity of a participant or an external contract (20 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of one token class inside a multi-token ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FillId
// ---------------------------------------------------------------------------

/// Unique identifier of a settlement fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FillId(pub Uuid);

impl FillId {
    /// Deterministic `FillId` from the matched pair and the engine's fill
    /// sequence.
    ///
    /// The same (bid, ask, sequence) triple always produces the same id,
    /// so replaying a settlement log reproduces the exact fill ids.
    #[must_use]
    pub fn deterministic(bid: OrderId, ask: OrderId, sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"assetdex:fill_id:v1:");
        hasher.update(bid.0.to_le_bytes());
        hasher.update(ask.0.to_le_bytes());
        hasher.update(sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_next_is_monotonic() {
        let id = OrderId(1);
        assert_eq!(id.next(), OrderId(2));
        assert!(id < id.next());
    }

    #[test]
    fn order_id_display() {
        assert_eq!(format!("{}", OrderId(7)), "order:7");
    }

    #[test]
    fn address_display_is_hex() {
        let addr = Address([0xab; 20]);
        let s = format!("{addr}");
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 42);
        assert_eq!(addr.short(), "abababab");
    }

    #[test]
    fn address_random_uniqueness() {
        let a = Address::random();
        let b = Address::random();
        assert_ne!(a, b);
    }

    #[test]
    fn fill_id_deterministic() {
        let a = FillId::deterministic(OrderId(1), OrderId(2), 0);
        let b = FillId::deterministic(OrderId(1), OrderId(2), 0);
        assert_eq!(a, b);
        let c = FillId::deterministic(OrderId(1), OrderId(2), 1);
        assert_ne!(a, c);
    }

    #[test]
    fn serde_roundtrips() {
        let oid = OrderId(42);
        let json = serde_json::to_string(&oid).unwrap();
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(oid, back);

        let addr = Address::random();
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
