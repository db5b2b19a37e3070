//! Per-recipient message templates
//!
//! Total function over (recipient role, status): every known status maps to
//! a title/body pair per role, with a generic fallback for anything
//! unmapped so new statuses can never panic the router.

use shared::notify::RecipientRole;
use shared::order::OrderStatus;

/// Title and body for a status-change notification
pub fn status_message(role: RecipientRole, status: OrderStatus) -> (String, String) {
    use OrderStatus::*;
    use RecipientRole::*;

    let (title, body) = match (role, status) {
        (Customer, Pending) => ("Order placed", "Your order has been placed and sent to the restaurant."),
        (Customer, Confirmed) => ("Order confirmed", "The restaurant has confirmed your order."),
        (Customer, Preparing) => ("Order in the kitchen", "Your food is being prepared."),
        (Customer, ReadyForDelivery) => ("Order packed", "Your order is packed and waiting for a courier."),
        (Customer, WaitingCourier) => ("Looking for a courier", "We are finding a courier for your order."),
        (Customer, Delivering) => ("Order on the way", "Your courier is on the way."),
        (Customer, Delivered) => ("Order delivered", "Enjoy your meal!"),
        (Customer, Cancelled) => ("Order cancelled", "Your order has been cancelled."),

        (RestaurantOwner, Pending) => ("New order", "A new order is waiting for confirmation."),
        (RestaurantOwner, Confirmed) => ("Order confirmed", "Order confirmed. Start preparing when ready."),
        (RestaurantOwner, Preparing) => ("Order in preparation", "Order marked as in preparation."),
        (RestaurantOwner, ReadyForDelivery) => ("Order ready", "Order packed and ready for pickup."),
        (RestaurantOwner, WaitingCourier) => ("Awaiting courier", "A courier is being assigned."),
        (RestaurantOwner, Delivering) => ("Order picked up", "The courier has picked up the order."),
        (RestaurantOwner, Delivered) => ("Order delivered", "The order reached the customer."),
        (RestaurantOwner, Cancelled) => ("Order cancelled", "The order has been cancelled."),

        (DeliveryPerson, ReadyForDelivery) => ("Pickup available", "An order is ready for pickup."),
        (DeliveryPerson, Delivering) => ("Delivery in progress", "You are delivering this order."),
        (DeliveryPerson, Delivered) => ("Delivery completed", "Delivery completed. Thank you!"),
        (DeliveryPerson, Cancelled) => ("Delivery cancelled", "This delivery has been cancelled."),

        (Admin, Cancelled) => ("Order cancelled", "An order was cancelled."),

        // Fallback for any (role, status) pair without a dedicated template
        (_, status) => {
            return (
                "Order update".to_string(),
                format!("Order status changed to {status:?}."),
            );
        }
    };
    (title.to_string(), body.to_string())
}

/// Message for the dedicated delivery-assignment notification
pub fn assignment_message(order_id: &str) -> (String, String) {
    (
        "New delivery assigned".to_string(),
        format!("You have been assigned order {order_id}. Head to the restaurant for pickup."),
    )
}

/// Message for the restaurant when an order is created
pub fn new_order_message(order_total: f64) -> (String, String) {
    (
        "New order received".to_string(),
        format!("New order for {order_total:.2}. Please confirm."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_over_all_known_pairs() {
        use OrderStatus::*;
        use RecipientRole::*;
        for role in [Customer, RestaurantOwner, DeliveryPerson, Admin] {
            for status in [
                Pending,
                Confirmed,
                Preparing,
                ReadyForDelivery,
                WaitingCourier,
                Delivering,
                Delivered,
                Cancelled,
            ] {
                let (title, body) = status_message(role, status);
                assert!(!title.is_empty());
                assert!(!body.is_empty());
            }
        }
    }

    #[test]
    fn test_fallback_carries_status() {
        let (_, body) = status_message(RecipientRole::Admin, OrderStatus::Preparing);
        assert!(body.contains("Preparing"));
    }

    #[test]
    fn test_assignment_message_names_order() {
        let (_, body) = assignment_message("order-42");
        assert!(body.contains("order-42"));
    }
}
