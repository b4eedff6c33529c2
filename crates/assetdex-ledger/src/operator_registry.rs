//! Operator registry: which addresses may trigger settlement.
//!
//! The exchange core consults [`OperatorRegistry::is_operator`] and
//! nothing else; grants and revocations are administration on the
//! collaborator side.

use std::collections::HashSet;

use assetdex_types::Address;

/// Interface to the external operator registry.
pub trait OperatorRegistry {
    /// Whether `addr` is an authorized settlement operator.
    fn is_operator(&self, addr: Address) -> bool;
}

/// In-memory operator registry.
#[derive(Debug, Default)]
pub struct OperatorSet {
    operators: HashSet<Address>,
}

impl OperatorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authorize `addr` as a settlement operator.
    pub fn grant(&mut self, addr: Address) {
        self.operators.insert(addr);
    }

    /// Remove `addr` from the operator set.
    pub fn revoke(&mut self, addr: Address) {
        self.operators.remove(&addr);
    }

    /// Number of registered operators.
    #[must_use]
    pub fn count(&self) -> usize {
        self.operators.len()
    }
}

impl OperatorRegistry for OperatorSet {
    fn is_operator(&self, addr: Address) -> bool {
        self.operators.contains(&addr)
    }
}
