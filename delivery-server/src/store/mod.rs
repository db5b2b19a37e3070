//! Store Module
//!
//! Collaborator traits for everything the workflow treats as external:
//! order persistence, address/user/restaurant lookup and the COD ledger.
//! The `memory` module provides DashMap-backed implementations used by
//! tests and local wiring.

pub mod memory;

pub use memory::{
    MemoryAddressLookup, MemoryCodStore, MemoryMenuStore, MemoryOrderStore, MemoryRestaurantStore,
    MemoryUserStore,
};

use async_trait::async_trait;
use shared::cod::{CodPreferences, CodTransaction};
use shared::models::{Address, MenuItem, Restaurant, UserProfile};
use shared::order::{Order, OrderFilter};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for crate::core::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => crate::core::AppError::NotFound(msg),
            StoreError::Duplicate(msg) => crate::core::AppError::InvalidOperation(msg),
            StoreError::Storage(msg) => crate::core::AppError::Internal(msg),
        }
    }
}

/// Order persistence
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch an order; `None` on miss (missing data is not an error here)
    async fn get(&self, id: &str) -> StoreResult<Option<Order>>;
    async fn insert(&self, order: Order) -> StoreResult<()>;
    async fn update(&self, order: Order) -> StoreResult<()>;
    async fn list(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>>;
}

/// Resolves stored coordinates for restaurants and customers
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn get_address(&self, id: &str) -> StoreResult<Option<Address>>;
}

/// Restaurant lookup
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Option<Restaurant>>;
}

/// Menu item lookup (order creation snapshots name and price from here)
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn get_item(&self, id: &str) -> StoreResult<Option<MenuItem>>;
}

/// User lookup (device token, active flag, role)
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Option<UserProfile>>;
}

/// COD ledger and driver balances
#[async_trait]
pub trait CodStore: Send + Sync {
    /// Current cash balance; drivers with no recorded activity start at 0
    async fn balance(&self, driver_id: &str) -> StoreResult<f64>;
    /// Overwrite the stored balance (callers hold the per-driver lock)
    async fn set_balance(&self, driver_id: &str, balance: f64) -> StoreResult<()>;
    async fn preferences(&self, driver_id: &str) -> StoreResult<CodPreferences>;
    async fn set_preferences(&self, driver_id: &str, prefs: CodPreferences) -> StoreResult<()>;
    async fn record_transaction(&self, txn: CodTransaction) -> StoreResult<()>;
    async fn transactions_for_driver(&self, driver_id: &str) -> StoreResult<Vec<CodTransaction>>;
}
