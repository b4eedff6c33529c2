//! Access gate for settlement entry points.
//!
//! Consults the operator registry before any settlement work happens.
//! Fail-closed: an unknown caller is rejected before lengths are checked
//! or a single order is loaded.

use assetdex_ledger::OperatorRegistry;
use assetdex_types::{Address, DexError, Result};

/// Wraps the settlement entry points with an operator check.
#[derive(Debug, Default)]
pub struct AccessGate;

impl AccessGate {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reject `caller` unless the registry knows them as an operator.
    ///
    /// # Errors
    /// Returns `Unauthorized` for any caller the registry does not list.
    pub fn authorize<R: OperatorRegistry>(&self, registry: &R, caller: Address) -> Result<()> {
        if registry.is_operator(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "Settlement attempt by non-operator");
            Err(DexError::Unauthorized(caller))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdex_ledger::OperatorSet;

    #[test]
    fn registered_operator_passes() {
        let mut registry = OperatorSet::new();
        let op = Address::random();
        registry.grant(op);

        let gate = AccessGate::new();
        assert!(gate.authorize(&registry, op).is_ok());
    }

    #[test]
    fn unknown_caller_is_rejected() {
        let registry = OperatorSet::new();
        let caller = Address::random();

        let gate = AccessGate::new();
        let err = gate.authorize(&registry, caller).unwrap_err();
        assert!(matches!(err, DexError::Unauthorized(addr) if addr == caller));
    }

    #[test]
    fn revoked_operator_is_rejected() {
        let mut registry = OperatorSet::new();
        let op = Address::random();
        registry.grant(op);
        registry.revoke(op);

        let gate = AccessGate::new();
        assert!(gate.authorize(&registry, op).is_err());
    }
}
