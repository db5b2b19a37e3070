//! Notification router
//!
//! Turns one order event into per-recipient envelopes and dispatches them.
//! The router never propagates failure to the caller: a status update must
//! not fail because a push provider is down or a user record is missing.
//! Each target is attempted independently; failures are logged and
//! swallowed.

use crate::notify::channels::{PushChannel, RealtimeChannel};
use crate::notify::messages;
use crate::store::{OrderStore, RestaurantStore, UserStore};
use shared::notify::{NotificationData, NotificationEnvelope, NotificationKind, RecipientRole};
use shared::order::{Order, OrderStatus};
use std::sync::Arc;
use tracing::{debug, warn};

/// Realtime event name for order status changes
const EVENT_STATUS_CHANGED: &str = "order_status_changed";
const EVENT_DELIVERY_ASSIGNED: &str = "delivery_assigned";
const EVENT_LOCATION_UPDATE: &str = "delivery_location";
const EVENT_NEW_ORDER: &str = "new_order";

/// Multi-channel notification fan-out
pub struct NotificationRouter {
    orders: Arc<dyn OrderStore>,
    restaurants: Arc<dyn RestaurantStore>,
    users: Arc<dyn UserStore>,
    realtime: Arc<dyn RealtimeChannel>,
    push: Arc<dyn PushChannel>,
}

impl NotificationRouter {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        restaurants: Arc<dyn RestaurantStore>,
        users: Arc<dyn UserStore>,
        realtime: Arc<dyn RealtimeChannel>,
        push: Arc<dyn PushChannel>,
    ) -> Self {
        Self {
            orders,
            restaurants,
            users,
            realtime,
            push,
        }
    }

    /// Fan out a status change to customer, restaurant owner, admin and -
    /// when assigned - the delivery person
    ///
    /// Best effort: never returns an error, never panics on missing data.
    pub async fn notify_status_change(
        &self,
        order_id: &str,
        previous: OrderStatus,
        new: OrderStatus,
        triggered_by: Option<&str>,
    ) {
        debug!(
            order_id,
            ?previous,
            ?new,
            triggered_by = triggered_by.unwrap_or("system"),
            "Dispatching status change notifications"
        );

        // Resolve order + restaurant; without the order there is nothing to
        // fan out, without the restaurant we still notify the rest
        let order = match self.orders.get(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!(order_id, "Status notification skipped: order not found");
                return;
            }
            Err(e) => {
                warn!(order_id, error = %e, "Status notification skipped: order lookup failed");
                return;
            }
        };

        for envelope in self.build_status_envelopes(&order, new).await {
            self.dispatch(&envelope).await;
        }
    }

    /// Dedicated assignment notification for the courier, fired once at
    /// assignment time in addition to the generic status change
    pub async fn notify_delivery_assignment(&self, order_id: &str, person_id: &str) {
        let (title, body) = messages::assignment_message(order_id);
        let envelope = NotificationEnvelope {
            role: RecipientRole::DeliveryPerson,
            recipient_id: person_id.to_string(),
            title,
            body,
            data: NotificationData {
                order_id: order_id.to_string(),
                restaurant_id: None,
                status: Some(OrderStatus::Delivering),
                kind: NotificationKind::DeliveryAssignment,
                target_screen: "delivery_detail".to_string(),
            },
        };
        self.dispatch(&envelope).await;
    }

    /// Creation notices: restaurant gets "new order", customer gets the
    /// Pending status message
    pub async fn notify_new_order(&self, order: &Order) {
        let mut envelopes = Vec::with_capacity(2);

        if let Some(owner_id) = self.restaurant_owner(&order.restaurant_id).await {
            let (title, body) = messages::new_order_message(order.total_amount);
            envelopes.push(NotificationEnvelope {
                role: RecipientRole::RestaurantOwner,
                recipient_id: owner_id,
                title,
                body,
                data: NotificationData {
                    order_id: order.id.clone(),
                    restaurant_id: Some(order.restaurant_id.clone()),
                    status: Some(order.status),
                    kind: NotificationKind::NewOrder,
                    target_screen: "restaurant_orders".to_string(),
                },
            });
        }

        let (title, body) = messages::status_message(RecipientRole::Customer, OrderStatus::Pending);
        envelopes.push(NotificationEnvelope {
            role: RecipientRole::Customer,
            recipient_id: order.customer_id.clone(),
            title,
            body,
            data: NotificationData {
                order_id: order.id.clone(),
                restaurant_id: Some(order.restaurant_id.clone()),
                status: Some(order.status),
                kind: NotificationKind::NewOrder,
                target_screen: "order_detail".to_string(),
            },
        });

        for envelope in &envelopes {
            self.dispatch(envelope).await;
        }
    }

    /// Forward raw courier coordinates to the order's realtime group.
    /// Realtime only - no push for high-frequency location updates.
    pub async fn notify_location_update(&self, order_id: &str, latitude: f64, longitude: f64) {
        let payload = serde_json::json!({
            "order_id": order_id,
            "latitude": latitude,
            "longitude": longitude,
        });
        if let Err(e) = self
            .realtime
            .send_to_group(&format!("Order_{order_id}"), EVENT_LOCATION_UPDATE, payload)
            .await
        {
            warn!(order_id, error = %e, "Location update dispatch failed");
        }
    }

    /// Build one envelope per fan-out target for a status change
    async fn build_status_envelopes(
        &self,
        order: &Order,
        status: OrderStatus,
    ) -> Vec<NotificationEnvelope> {
        let mut envelopes = Vec::with_capacity(4);

        let data = |role: RecipientRole| NotificationData {
            order_id: order.id.clone(),
            restaurant_id: Some(order.restaurant_id.clone()),
            status: Some(status),
            kind: NotificationKind::StatusChange,
            target_screen: match role {
                RecipientRole::Customer => "order_detail".to_string(),
                RecipientRole::RestaurantOwner => "restaurant_orders".to_string(),
                RecipientRole::DeliveryPerson => "delivery_detail".to_string(),
                RecipientRole::Admin => "admin_dashboard".to_string(),
            },
        };

        let (title, body) = messages::status_message(RecipientRole::Customer, status);
        envelopes.push(NotificationEnvelope {
            role: RecipientRole::Customer,
            recipient_id: order.customer_id.clone(),
            title,
            body,
            data: data(RecipientRole::Customer),
        });

        if let Some(owner_id) = self.restaurant_owner(&order.restaurant_id).await {
            let (title, body) = messages::status_message(RecipientRole::RestaurantOwner, status);
            envelopes.push(NotificationEnvelope {
                role: RecipientRole::RestaurantOwner,
                recipient_id: owner_id,
                title,
                body,
                data: data(RecipientRole::RestaurantOwner),
            });
        }

        // Courier envelope only when the order carries an assignee
        if let Some(person_id) = &order.delivery_person_id {
            let (title, body) = messages::status_message(RecipientRole::DeliveryPerson, status);
            envelopes.push(NotificationEnvelope {
                role: RecipientRole::DeliveryPerson,
                recipient_id: person_id.clone(),
                title,
                body,
                data: data(RecipientRole::DeliveryPerson),
            });
        }

        let (title, body) = messages::status_message(RecipientRole::Admin, status);
        envelopes.push(NotificationEnvelope {
            role: RecipientRole::Admin,
            recipient_id: "admin".to_string(),
            title,
            body,
            data: data(RecipientRole::Admin),
        });

        envelopes
    }

    /// Owner id for a restaurant; logged and `None` on any miss
    async fn restaurant_owner(&self, restaurant_id: &str) -> Option<String> {
        match self.restaurants.get(restaurant_id).await {
            Ok(Some(restaurant)) => Some(restaurant.owner_id),
            Ok(None) => {
                warn!(restaurant_id, "Restaurant not found, skipping owner notification");
                None
            }
            Err(e) => {
                warn!(restaurant_id, error = %e, "Restaurant lookup failed, skipping owner notification");
                None
            }
        }
    }

    /// Dispatch one envelope over its channels, swallowing failures
    ///
    /// Persons get realtime (group) + push (device token); the admin
    /// dashboard gets the realtime broadcast only.
    async fn dispatch(&self, envelope: &NotificationEnvelope) {
        let event = match envelope.data.kind {
            NotificationKind::StatusChange => EVENT_STATUS_CHANGED,
            NotificationKind::DeliveryAssignment => EVENT_DELIVERY_ASSIGNED,
            NotificationKind::LocationUpdate => EVENT_LOCATION_UPDATE,
            NotificationKind::NewOrder => EVENT_NEW_ORDER,
        };
        let payload = match serde_json::to_value(envelope) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Envelope serialization failed, dropping notification");
                return;
            }
        };

        if let Err(e) = self
            .realtime
            .send_to_group(&envelope.group_key(), event, payload.clone())
            .await
        {
            warn!(
                role = %envelope.role,
                recipient = %envelope.recipient_id,
                error = %e,
                "Realtime dispatch failed"
            );
        }

        // Admin fan-out is realtime-only
        if envelope.role == RecipientRole::Admin {
            return;
        }

        match self.users.get(&envelope.recipient_id).await {
            Ok(Some(user)) => {
                let Some(token) = user.device_token.as_deref() else {
                    // No registered device: skip push silently
                    return;
                };
                if let Err(e) = self
                    .push
                    .send(token, &envelope.title, &envelope.body, payload)
                    .await
                {
                    warn!(
                        role = %envelope.role,
                        recipient = %envelope.recipient_id,
                        error = %e,
                        "Push dispatch failed"
                    );
                }
            }
            Ok(None) => {
                warn!(
                    recipient = %envelope.recipient_id,
                    "Push skipped: user not found"
                );
            }
            Err(e) => {
                warn!(
                    recipient = %envelope.recipient_id,
                    error = %e,
                    "Push skipped: user lookup failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::channels::{ChannelError, InProcessRealtimeChannel};
    use crate::store::{
        MemoryOrderStore, MemoryRestaurantStore, MemoryUserStore, OrderStore,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;
    use shared::models::{Restaurant, UserProfile, UserRole};
    use shared::order::{PaymentMethod, PaymentStatus};

    /// Push channel that records every send, optionally failing
    #[derive(Default)]
    struct RecordingPushChannel {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl crate::notify::channels::PushChannel for RecordingPushChannel {
        async fn send(
            &self,
            device_token: &str,
            title: &str,
            _body: &str,
            _data: Value,
        ) -> Result<(), ChannelError> {
            if self.fail {
                return Err(ChannelError::SendFailed("provider down".to_string()));
            }
            self.sent
                .lock()
                .push((device_token.to_string(), title.to_string()));
            Ok(())
        }
    }

    struct Fixture {
        router: NotificationRouter,
        orders: Arc<MemoryOrderStore>,
        realtime: InProcessRealtimeChannel,
        push: Arc<RecordingPushChannel>,
    }

    fn fixture(push_fails: bool) -> Fixture {
        let orders = Arc::new(MemoryOrderStore::new());
        let restaurants = Arc::new(MemoryRestaurantStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let realtime = InProcessRealtimeChannel::new();
        let push = Arc::new(RecordingPushChannel {
            fail: push_fails,
            ..Default::default()
        });

        restaurants.put(Restaurant {
            id: "rest-1".to_string(),
            name: "Test Kitchen".to_string(),
            owner_id: "owner-1".to_string(),
            location: None,
            custom_delivery_fee: None,
            is_active: true,
        });
        users.put(UserProfile {
            id: "cust-1".to_string(),
            name: "Customer".to_string(),
            role: UserRole::Customer,
            device_token: Some("tok-cust".to_string()),
            is_active: true,
        });
        users.put(UserProfile {
            id: "owner-1".to_string(),
            name: "Owner".to_string(),
            role: UserRole::RestaurantOwner,
            device_token: Some("tok-owner".to_string()),
            is_active: true,
        });
        users.put(UserProfile {
            id: "driver-1".to_string(),
            name: "Driver".to_string(),
            role: UserRole::DeliveryPerson,
            device_token: None, // no registered device
            is_active: true,
        });

        let router = NotificationRouter::new(
            orders.clone(),
            restaurants,
            users,
            Arc::new(realtime.clone()),
            push.clone(),
        );
        Fixture {
            router,
            orders,
            realtime,
            push,
        }
    }

    fn order(id: &str, driver: Option<&str>, status: OrderStatus) -> shared::order::Order {
        shared::order::Order {
            id: id.to_string(),
            customer_id: "cust-1".to_string(),
            restaurant_id: "rest-1".to_string(),
            delivery_person_id: driver.map(|d| d.to_string()),
            items: vec![],
            subtotal: 20.0,
            delivery_fee: 3.0,
            tax: 1.6,
            total_amount: 24.6,
            status,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cash,
            delivery_address_id: "addr-1".to_string(),
            estimated_delivery_minutes: None,
            cancellation_reason: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    fn drain(
        rx: &mut tokio::sync::broadcast::Receiver<crate::notify::channels::RealtimeMessage>,
    ) -> Vec<crate::notify::channels::RealtimeMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    #[tokio::test]
    async fn test_unassigned_order_fans_out_to_three_targets() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();
        f.orders
            .insert(order("o1", None, OrderStatus::Confirmed))
            .await
            .unwrap();

        f.router
            .notify_status_change("o1", OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await;

        let msgs = drain(&mut rx);
        let targets: Vec<&str> = msgs.iter().map(|m| m.target.as_str()).collect();
        assert_eq!(targets, vec!["Order_o1", "Restaurant_rest-1", "admin"]);
        // Push: customer + owner have tokens, admin gets none
        assert_eq!(f.push.sent.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_assigned_order_adds_courier_target() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();
        f.orders
            .insert(order("o1", Some("driver-1"), OrderStatus::Delivering))
            .await
            .unwrap();

        f.router
            .notify_status_change(
                "o1",
                OrderStatus::ReadyForDelivery,
                OrderStatus::Delivering,
                Some("admin-1"),
            )
            .await;

        let msgs = drain(&mut rx);
        assert_eq!(msgs.len(), 4);
        assert!(msgs.iter().any(|m| m.target == "Delivery_driver-1"));
        // Driver has no device token: push only for customer + owner
        assert_eq!(f.push.sent.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_push_failure_does_not_block_other_targets() {
        let f = fixture(true);
        let mut rx = f.realtime.subscribe();
        f.orders
            .insert(order("o1", None, OrderStatus::Confirmed))
            .await
            .unwrap();

        // Must not panic or error out
        f.router
            .notify_status_change("o1", OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await;

        // Realtime targets all still reached
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[tokio::test]
    async fn test_missing_order_is_swallowed() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();

        f.router
            .notify_status_change("ghost", OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await;

        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_assignment_notification_targets_courier() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();

        f.router.notify_delivery_assignment("o1", "driver-1").await;

        let msgs = drain(&mut rx);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].target, "Delivery_driver-1");
        assert_eq!(msgs[0].event, "delivery_assigned");
    }

    #[tokio::test]
    async fn test_location_update_realtime_only() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();

        f.router.notify_location_update("o1", 40.0, -3.0).await;

        let msgs = drain(&mut rx);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].target, "Order_o1");
        assert_eq!(msgs[0].payload["latitude"], 40.0);
        assert!(f.push.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_new_order_notifies_restaurant_and_customer() {
        let f = fixture(false);
        let mut rx = f.realtime.subscribe();
        let o = order("o1", None, OrderStatus::Pending);

        f.router.notify_new_order(&o).await;

        let msgs = drain(&mut rx);
        assert_eq!(msgs.len(), 2);
        assert!(msgs.iter().any(|m| m.target == "Restaurant_rest-1"));
        assert!(msgs.iter().any(|m| m.target == "Order_o1"));
    }
}
