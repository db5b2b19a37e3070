//! In-memory store implementations
//!
//! DashMap-backed implementations of the collaborator traits. Used by the
//! test suite and for local single-process wiring; a deployment substitutes
//! database-backed implementations behind the same traits.

use super::{StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use shared::cod::{CodPreferences, CodTransaction};
use shared::models::{Address, MenuItem, Restaurant, UserProfile};
use shared::order::{Order, OrderFilter};

/// In-memory order store
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::OrderStore for MemoryOrderStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(id).map(|o| o.clone()))
    }

    async fn insert(&self, order: Order) -> StoreResult<()> {
        if self.orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(format!("order {}", order.id)));
        }
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn update(&self, order: Order) -> StoreResult<()> {
        if !self.orders.contains_key(&order.id) {
            return Err(StoreError::NotFound(format!("order {}", order.id)));
        }
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn list(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first, stable for equal timestamps
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }
}

/// In-memory address lookup
#[derive(Debug, Default)]
pub struct MemoryAddressLookup {
    addresses: DashMap<String, Address>,
}

impl MemoryAddressLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, address: Address) {
        self.addresses.insert(address.id.clone(), address);
    }
}

#[async_trait]
impl super::AddressLookup for MemoryAddressLookup {
    async fn get_address(&self, id: &str) -> StoreResult<Option<Address>> {
        Ok(self.addresses.get(id).map(|a| a.clone()))
    }
}

/// In-memory restaurant store
#[derive(Debug, Default)]
pub struct MemoryRestaurantStore {
    restaurants: DashMap<String, Restaurant>,
}

impl MemoryRestaurantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, restaurant: Restaurant) {
        self.restaurants.insert(restaurant.id.clone(), restaurant);
    }
}

#[async_trait]
impl super::RestaurantStore for MemoryRestaurantStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        Ok(self.restaurants.get(id).map(|r| r.clone()))
    }
}

/// In-memory menu store
#[derive(Debug, Default)]
pub struct MemoryMenuStore {
    items: DashMap<String, MenuItem>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, item: MenuItem) {
        self.items.insert(item.id.clone(), item);
    }
}

#[async_trait]
impl super::MenuStore for MemoryMenuStore {
    async fn get_item(&self, id: &str) -> StoreResult<Option<MenuItem>> {
        Ok(self.items.get(id).map(|i| i.clone()))
    }
}

/// In-memory user store
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, UserProfile>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, user: UserProfile) {
        self.users.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl super::UserStore for MemoryUserStore {
    async fn get(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }
}

/// In-memory COD ledger
#[derive(Debug, Default)]
pub struct MemoryCodStore {
    balances: DashMap<String, f64>,
    preferences: DashMap<String, CodPreferences>,
    transactions: DashMap<String, CodTransaction>,
}

impl MemoryCodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::CodStore for MemoryCodStore {
    async fn balance(&self, driver_id: &str) -> StoreResult<f64> {
        Ok(self.balances.get(driver_id).map(|b| *b).unwrap_or(0.0))
    }

    async fn set_balance(&self, driver_id: &str, balance: f64) -> StoreResult<()> {
        self.balances.insert(driver_id.to_string(), balance);
        Ok(())
    }

    async fn preferences(&self, driver_id: &str) -> StoreResult<CodPreferences> {
        Ok(self
            .preferences
            .get(driver_id)
            .map(|p| p.clone())
            .unwrap_or_default())
    }

    async fn set_preferences(&self, driver_id: &str, prefs: CodPreferences) -> StoreResult<()> {
        self.preferences.insert(driver_id.to_string(), prefs);
        Ok(())
    }

    async fn record_transaction(&self, txn: CodTransaction) -> StoreResult<()> {
        self.transactions.insert(txn.id.clone(), txn);
        Ok(())
    }

    async fn transactions_for_driver(&self, driver_id: &str) -> StoreResult<Vec<CodTransaction>> {
        let mut txns: Vec<CodTransaction> = self
            .transactions
            .iter()
            .filter(|entry| entry.value().delivery_person_id == driver_id)
            .map(|entry| entry.value().clone())
            .collect();
        txns.sort_by_key(|t| t.created_at);
        Ok(txns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OrderStore;
    use shared::order::{OrderStatus, PaymentMethod, PaymentStatus};

    fn sample_order(id: &str, customer: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_id: customer.to_string(),
            restaurant_id: "rest-1".to_string(),
            delivery_person_id: None,
            items: vec![],
            subtotal: 20.0,
            delivery_fee: 3.0,
            tax: 1.6,
            total_amount: 24.6,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cash,
            delivery_address_id: "addr-1".to_string(),
            estimated_delivery_minutes: None,
            cancellation_reason: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate() {
        let store = MemoryOrderStore::new();
        store.insert(sample_order("o1", "c1")).await.unwrap();
        let err = store.insert(sample_order("o1", "c1")).await;
        assert!(matches!(err, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_update_requires_existing() {
        let store = MemoryOrderStore::new();
        let err = store.update(sample_order("o1", "c1")).await;
        assert!(matches!(err, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_customer() {
        let store = MemoryOrderStore::new();
        store.insert(sample_order("o1", "c1")).await.unwrap();
        store.insert(sample_order("o2", "c2")).await.unwrap();

        let filter = OrderFilter {
            customer_id: Some("c1".to_string()),
            ..Default::default()
        };
        let orders = store.list(&filter).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, "o1");
    }
}
