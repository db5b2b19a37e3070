//! User roles
//!
//! Closed enum instead of role-string dispatch; permission checks are
//! explicit functions on the enum.

use serde::{Deserialize, Serialize};

/// User role (RBAC)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    RestaurantOwner,
    DeliveryPerson,
    Admin,
}

impl UserRole {
    /// Whether this role may update any order's status
    pub fn can_manage_orders(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::RestaurantOwner)
    }
}
