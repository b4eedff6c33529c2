//! The authoritative order arena.
//!
//! Orders are keyed by a monotonically increasing id (first order gets
//! id 1) and are never physically removed: closed orders remain
//! queryable for audit. The ordered map keeps audit iteration in
//! allocation order.

use std::collections::BTreeMap;

use assetdex_types::{Address, AssetRef, DexError, Order, OrderId, OrderSide, Result};
use chrono::Utc;
use rust_decimal::Decimal;

/// Append-only store of every order the venue has ever accepted.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: BTreeMap<OrderId, Order>,
    last_id: u64,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id and insert a new active order.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if `quantity` or `price` is not strictly
    /// positive.
    pub fn create(
        &mut self,
        owner: Address,
        asset: AssetRef,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderId> {
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

        self.last_id += 1;
        let id = OrderId(self.last_id);
        let order = Order {
            id,
            owner,
            asset,
            side,
            price,
            quantity,
            remaining: quantity,
            is_active: true,
            created_at: Utc::now(),
        };
        self.orders.insert(id, order);
        Ok(id)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    /// Returns `OrderNotFound` if the id was never allocated.
    pub fn get(&self, id: OrderId) -> Result<&Order> {
        self.orders.get(&id).ok_or(DexError::OrderNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: OrderId) -> Result<&mut Order> {
        self.orders.get_mut(&id).ok_or(DexError::OrderNotFound(id))
    }

    /// Close an order. Callers check `is_active` before invoking; the
    /// guard here asserts the one-way transition, it is not race
    /// protection (execution is sequential).
    ///
    /// # Errors
    /// - `OrderNotFound` if the id was never allocated
    /// - `AlreadyInactive` if the order is already closed
    pub fn set_inactive(&mut self, id: OrderId) -> Result<()> {
        let order = self.get_mut(id)?;
        if !order.is_active {
            return Err(DexError::AlreadyInactive(id));
        }
        order.is_active = false;
        Ok(())
    }

    /// Number of orders ever accepted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// All orders in allocation order, open and closed.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdex_types::TokenId;

    fn asset() -> AssetRef {
        AssetRef::new(Address::random(), TokenId(1))
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut store = OrderStore::new();
        let owner = Address::random();
        let a = store
            .create(owner, asset(), OrderSide::Bid, Decimal::new(10, 0), Decimal::ONE)
            .unwrap();
        let b = store
            .create(owner, asset(), OrderSide::Ask, Decimal::new(10, 0), Decimal::ONE)
            .unwrap();
        assert_eq!(a, OrderId(1));
        assert_eq!(b, OrderId(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn created_order_is_active_with_full_remaining() {
        let mut store = OrderStore::new();
        let owner = Address::random();
        let id = store
            .create(
                owner,
                asset(),
                OrderSide::Bid,
                Decimal::new(100, 0),
                Decimal::new(100, 0),
            )
            .unwrap();

        let order = store.get(id).unwrap();
        assert_eq!(order.owner, owner);
        assert!(order.is_active);
        assert!(order.is_bid());
        assert_eq!(order.remaining, Decimal::new(100, 0));
        assert_eq!(order.quantity, Decimal::new(100, 0));
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut store = OrderStore::new();
        let err = store
            .create(
                Address::random(),
                asset(),
                OrderSide::Bid,
                Decimal::ZERO,
                Decimal::ONE,
            )
            .unwrap_err();
        assert!(matches!(err, DexError::InvalidAmount { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn zero_price_rejected() {
        let mut store = OrderStore::new();
        let err = store
            .create(
                Address::random(),
                asset(),
                OrderSide::Ask,
                Decimal::ONE,
                Decimal::ZERO,
            )
            .unwrap_err();
        assert!(matches!(err, DexError::InvalidAmount { .. }));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = OrderStore::new();
        let err = store.get(OrderId(1)).unwrap_err();
        assert!(matches!(err, DexError::OrderNotFound(OrderId(1))));
    }

    #[test]
    fn set_inactive_is_one_way() {
        let mut store = OrderStore::new();
        let id = store
            .create(
                Address::random(),
                asset(),
                OrderSide::Bid,
                Decimal::ONE,
                Decimal::ONE,
            )
            .unwrap();

        store.set_inactive(id).unwrap();
        assert!(!store.get(id).unwrap().is_active);

        let err = store.set_inactive(id).unwrap_err();
        assert!(matches!(err, DexError::AlreadyInactive(_)));
    }

    #[test]
    fn closed_orders_stay_queryable() {
        let mut store = OrderStore::new();
        let id = store
            .create(
                Address::random(),
                asset(),
                OrderSide::Ask,
                Decimal::new(5, 0),
                Decimal::new(50, 0),
            )
            .unwrap();
        store.set_inactive(id).unwrap();

        let order = store.get(id).unwrap();
        assert_eq!(order.quantity, Decimal::new(5, 0));
        assert_eq!(store.iter().count(), 1);
    }
}
