//! Notification envelope types
//!
//! One logical order event fans out to multiple recipients; each recipient
//! gets its own envelope (title, body, structured data payload). Envelopes
//! are transient - they are built per dispatch target and handed to the
//! channel collaborators.

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification recipient role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientRole {
    Customer,
    RestaurantOwner,
    DeliveryPerson,
    Admin,
}

impl fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::RestaurantOwner => write!(f, "restaurant_owner"),
            Self::DeliveryPerson => write!(f, "delivery_person"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Notification kind tag, carried in the payload so clients can route
/// to the right screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    StatusChange,
    DeliveryAssignment,
    LocationUpdate,
    NewOrder,
}

/// Structured payload attached to every envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationData {
    pub order_id: String,
    /// Restaurant the order belongs to; keys the restaurant realtime group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub kind: NotificationKind,
    /// Client-side navigation hint ("order_detail", "delivery_map", ...)
    pub target_screen: String,
}

/// Per-recipient notification envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    pub role: RecipientRole,
    /// Recipient user id; for admin broadcast this is the channel alias
    pub recipient_id: String,
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

impl NotificationEnvelope {
    /// Realtime group key for this envelope's recipient
    ///
    /// Customers join per-order groups, restaurant dashboards join the
    /// restaurant's group (keyed by restaurant id, so every owner device
    /// shares one subscription), couriers join per-person groups and the
    /// admin dashboard listens on a fixed `admin` alias.
    pub fn group_key(&self) -> String {
        match self.role {
            RecipientRole::Customer => format!("Order_{}", self.data.order_id),
            RecipientRole::RestaurantOwner => format!(
                "Restaurant_{}",
                self.data.restaurant_id.as_deref().unwrap_or(&self.recipient_id)
            ),
            RecipientRole::DeliveryPerson => format!("Delivery_{}", self.recipient_id),
            RecipientRole::Admin => "admin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_keys() {
        let envelope = NotificationEnvelope {
            role: RecipientRole::Customer,
            recipient_id: "cust-1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            data: NotificationData {
                order_id: "order-9".to_string(),
                restaurant_id: Some("rest-4".to_string()),
                status: Some(OrderStatus::Confirmed),
                kind: NotificationKind::StatusChange,
                target_screen: "order_detail".to_string(),
            },
        };
        assert_eq!(envelope.group_key(), "Order_order-9");

        // Restaurant group keyed by the restaurant, not the owner's user id
        let owner = NotificationEnvelope {
            role: RecipientRole::RestaurantOwner,
            recipient_id: "owner-1".to_string(),
            ..envelope.clone()
        };
        assert_eq!(owner.group_key(), "Restaurant_rest-4");

        let admin = NotificationEnvelope {
            role: RecipientRole::Admin,
            recipient_id: "admin".to_string(),
            ..envelope.clone()
        };
        assert_eq!(admin.group_key(), "admin");
    }
}
