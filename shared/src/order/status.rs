//! Order lifecycle status
//!
//! The status enum carries the legal transition table. Guarded operations
//! (courier assignment, delivery completion) layer extra checks on top of
//! `can_transition` in the server's state machine.

use serde::{Deserialize, Serialize};

/// Order status
///
/// Normal flow:
///
/// ```text
/// Pending → Confirmed → Preparing → ReadyForDelivery → WaitingCourier
///                                        │                  │
///                                        └───► Delivering ◄─┘
///                                                  │
///                                                  ▼
///                                              Delivered
/// ```
///
/// `Cancelled` is reachable from any non-terminal state. `Delivered` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed by the customer, awaiting restaurant confirmation
    #[default]
    Pending,
    /// Accepted by the restaurant
    Confirmed,
    /// Kitchen is preparing the order
    Preparing,
    /// Packed and waiting for courier assignment
    ReadyForDelivery,
    /// Published to the courier pool, no courier picked it up yet
    WaitingCourier,
    /// Courier assigned and en route
    Delivering,
    /// Handed to the customer
    Delivered,
    /// Terminated before delivery
    Cancelled,
}

impl OrderStatus {
    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the order is still in flight
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment method
///
/// `Cash` selects the COD settlement path (driver collects on delivery).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Online,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Delivering.is_terminal());
        assert!(OrderStatus::Preparing.is_active());
        assert!(!OrderStatus::Delivered.is_active());
    }

    #[test]
    fn test_serde_wire_form() {
        let json = serde_json::to_string(&OrderStatus::ReadyForDelivery).unwrap();
        assert_eq!(json, "\"READY_FOR_DELIVERY\"");
    }
}
