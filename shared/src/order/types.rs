//! Order model and request-side inputs

use super::status::{OrderStatus, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Order line item - snapshot of a menu item at ordering time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Menu item ID
    pub menu_item_id: String,
    /// Item name snapshot (menus change, orders don't)
    pub name: String,
    /// Quantity
    pub quantity: i32,
    /// Unit price at ordering time
    pub unit_price: f64,
    /// Special instructions ("no onions")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderLineItem {
    /// Line total (unit price × quantity), unrounded
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Order - the central aggregate of the delivery workflow
///
/// Invariant: `total_amount == subtotal + delivery_fee + tax` at all times
/// after creation. Orders are never physically deleted; cancellation is a
/// terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID (assigned by server)
    pub id: String,
    /// Customer ID
    pub customer_id: String,
    /// Restaurant ID
    pub restaurant_id: String,
    /// Assigned delivery person, set at assignment time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_person_id: Option<String>,
    /// Ordered items
    pub items: Vec<OrderLineItem>,
    /// Sum of line totals
    pub subtotal: f64,
    /// Delivery fee computed at creation
    pub delivery_fee: f64,
    /// Tax amount
    pub tax: f64,
    /// Final amount: subtotal + delivery_fee + tax
    pub total_amount: f64,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// Payment method
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Delivery address reference
    pub delivery_address_id: String,
    /// Estimated delivery time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_minutes: Option<u32>,
    /// Cancellation reason, set when status becomes Cancelled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    /// Last modification timestamp (epoch millis)
    pub updated_at: i64,
}

impl Order {
    /// Stamp the last-modified time
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Whether the order is assigned to the given delivery person
    pub fn is_assigned_to(&self, person_id: &str) -> bool {
        self.delivery_person_id.as_deref() == Some(person_id)
    }
}

/// Item input for order creation (menu reference + quantity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Create order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub restaurant_id: String,
    pub delivery_address_id: String,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Rush delivery requested
    #[serde(default)]
    pub is_rush_delivery: bool,
}

/// Listing filter for order queries
///
/// Admin queries leave all fields unset; customer/restaurant scoped queries
/// set the corresponding id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Whether an order matches every set field
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(id) = &self.customer_id
            && &order.customer_id != id
        {
            return false;
        }
        if let Some(id) = &self.restaurant_id
            && &order.restaurant_id != id
        {
            return false;
        }
        if let Some(id) = &self.delivery_person_id
            && order.delivery_person_id.as_ref() != Some(id)
        {
            return false;
        }
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        true
    }
}
