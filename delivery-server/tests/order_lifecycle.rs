//! End-to-end order lifecycle over in-memory stores
//!
//! Drives one cash order from creation through delivery and COD settlement,
//! watching the realtime fan-out along the way.

use async_trait::async_trait;
use delivery_server::notify::channels::{
    ChannelError, InProcessRealtimeChannel, PushChannel, RealtimeMessage,
};
use delivery_server::store::{
    MemoryAddressLookup, MemoryCodStore, MemoryMenuStore, MemoryOrderStore, MemoryRestaurantStore,
    MemoryUserStore,
};
use delivery_server::{CodService, NotificationRouter, OrderWorkflow, SettingsService};
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::{Address, Coordinates, MenuItem, Restaurant, UserProfile, UserRole};
use shared::order::{CreateOrderInput, OrderFilter, OrderItemInput, OrderStatus, PaymentMethod, PaymentStatus};
use std::sync::Arc;

#[derive(Default)]
struct RecordingPushChannel {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl PushChannel for RecordingPushChannel {
    async fn send(
        &self,
        device_token: &str,
        _title: &str,
        _body: &str,
        _data: Value,
    ) -> Result<(), ChannelError> {
        self.sent.lock().push(device_token.to_string());
        Ok(())
    }
}

struct Harness {
    workflow: OrderWorkflow,
    cod: CodService,
    realtime: InProcessRealtimeChannel,
    push: Arc<RecordingPushChannel>,
}

fn harness() -> Harness {
    let orders = Arc::new(MemoryOrderStore::new());
    let restaurants = Arc::new(MemoryRestaurantStore::new());
    let menu = Arc::new(MemoryMenuStore::new());
    let addresses = Arc::new(MemoryAddressLookup::new());
    let users = Arc::new(MemoryUserStore::new());
    let ledger = Arc::new(MemoryCodStore::new());
    let realtime = InProcessRealtimeChannel::new();
    let push = Arc::new(RecordingPushChannel::default());

    // Restaurant with a custom base fee, customer ~12 km away: out-of-town
    // tier, base 10 × 1.5 = 15, distance (12 − 5) × 2 = 14, fee 29
    restaurants.put(Restaurant {
        id: "rest-1".to_string(),
        name: "Casa Norte".to_string(),
        owner_id: "owner-1".to_string(),
        location: Some(Coordinates::new(40.0, -3.0)),
        custom_delivery_fee: Some(10.0),
        is_active: true,
    });
    menu.put(MenuItem {
        id: "m-1".to_string(),
        restaurant_id: "rest-1".to_string(),
        name: "Paella".to_string(),
        price: 12.5,
        is_available: true,
    });
    addresses.put(Address {
        id: "addr-1".to_string(),
        user_id: "cust-1".to_string(),
        street: "Far End Rd".to_string(),
        city: "Outskirts".to_string(),
        coordinates: Coordinates::new(40.0 + 12.0 / 111.19, -3.0),
        is_default: true,
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
        device_token: Some("tok-driver".to_string()),
        is_active: true,
    });

    let router = Arc::new(NotificationRouter::new(
        orders.clone(),
        restaurants.clone(),
        users.clone(),
        Arc::new(realtime.clone()),
        push.clone(),
    ));
    let workflow = OrderWorkflow::new(
        orders.clone(),
        restaurants,
        menu,
        addresses,
        users,
        Arc::new(SettingsService::default()),
        router,
        8.0,
    );
    let cod = CodService::new(orders, ledger);
    Harness {
        workflow,
        cod,
        realtime,
        push,
    }
}

fn order_input() -> CreateOrderInput {
    CreateOrderInput {
        customer_id: "cust-1".to_string(),
        restaurant_id: "rest-1".to_string(),
        delivery_address_id: "addr-1".to_string(),
        items: vec![OrderItemInput {
            menu_item_id: "m-1".to_string(),
            quantity: 2,
            special_instructions: Some("Extra lemon".to_string()),
        }],
        payment_method: PaymentMethod::Cash,
        is_rush_delivery: false,
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<RealtimeMessage>) -> Vec<RealtimeMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

#[tokio::test]
async fn cash_order_full_lifecycle() {
    let h = harness();

    // Create: 2 × 12.50 = 25.00, fee 29.00, tax 8% = 2.00, total 56.00
    let order = h.workflow.create_order(order_input()).await.unwrap();
    assert_eq!(order.subtotal, 25.0);
    assert!((order.delivery_fee - 29.0).abs() < 0.05);
    assert_eq!(order.tax, 2.0);
    assert!(
        (order.total_amount - (order.subtotal + order.delivery_fee + order.tax)).abs() < 0.01
    );
    assert_eq!(order.status, OrderStatus::Pending);

    // Kitchen flow
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::ReadyForDelivery,
    ] {
        let updated = h
            .workflow
            .update_status(&order.id, status, Some("owner-1"))
            .await
            .unwrap();
        assert_eq!(updated.status, status);
    }

    // Assignment: one dedicated assignment note to the courier plus a
    // four-target status fan-out (customer, owner, courier, admin)
    let mut rx = h.realtime.subscribe();
    h.push.sent.lock().clear();
    let assigned = h
        .workflow
        .assign_delivery_person(&order.id, "driver-1")
        .await
        .unwrap();
    assert_eq!(assigned.status, OrderStatus::Delivering);
    assert!(assigned.is_assigned_to("driver-1"));

    let msgs = drain(&mut rx);
    assert_eq!(msgs.len(), 5);
    assert_eq!(
        msgs.iter()
            .filter(|m| m.target == "Delivery_driver-1")
            .count(),
        2
    );
    assert!(msgs.iter().any(|m| m.target == format!("Order_{}", order.id)));
    assert!(msgs.iter().any(|m| m.target == "Restaurant_rest-1"));
    assert!(msgs.iter().any(|m| m.target == "admin"));
    // Push for every person with a token, none for the admin broadcast
    assert_eq!(h.push.sent.lock().len(), 4);

    // Only the assigned courier may complete
    let err = h
        .workflow
        .complete_delivery(&order.id, "driver-9")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");
    let delivered = h
        .workflow
        .complete_delivery(&order.id, "driver-1")
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // COD settlement: driver fronts 56.00, collects 56.00 + 29.00
    h.cod.update_balance("driver-1", 100.0).await.unwrap();
    let settlement = h.cod.process_payment(&order.id).await;
    assert!(settlement.success, "{:?}", settlement.message);
    assert_eq!(settlement.transaction_ids.len(), 2);
    let expected = 100.0 + delivered.delivery_fee;
    assert!((settlement.new_balance.unwrap() - expected).abs() < 0.01);

    let paid = h.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    // Delivered orders cannot be cancelled and stay unmodified
    let err = h.workflow.cancel_order(&order.id, None).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_OPERATION");
    let still = h.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(still.status, OrderStatus::Delivered);
    assert!(still.cancellation_reason.is_none());
}

#[tokio::test]
async fn listing_scopes_by_participant() {
    let h = harness();
    let order = h.workflow.create_order(order_input()).await.unwrap();

    let mine = h
        .workflow
        .list_orders(&OrderFilter {
            customer_id: Some("cust-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order.id);

    let theirs = h
        .workflow
        .list_orders(&OrderFilter {
            customer_id: Some("cust-2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(theirs.is_empty());

    // Admin-style unscoped listing
    let all = h.workflow.list_orders(&OrderFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn free_delivery_above_threshold() {
    let h = harness();
    // 5 × 12.50 = 62.50 ≥ 50.00 threshold: fee waived even out of town
    let mut input = order_input();
    input.items[0].quantity = 5;

    let order = h.workflow.create_order(input).await.unwrap();
    assert_eq!(order.delivery_fee, 0.0);
    assert_eq!(order.subtotal, 62.5);
    assert_eq!(order.tax, 5.0);
    assert_eq!(order.total_amount, 67.5);
}

#[tokio::test]
async fn cod_settlement_requires_sufficient_cash() {
    let h = harness();
    let order = h.workflow.create_order(order_input()).await.unwrap();
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::ReadyForDelivery,
    ] {
        h.workflow
            .update_status(&order.id, status, None)
            .await
            .unwrap();
    }
    h.workflow
        .assign_delivery_person(&order.id, "driver-1")
        .await
        .unwrap();
    h.workflow
        .complete_delivery(&order.id, "driver-1")
        .await
        .unwrap();

    // Driver carries less cash than the order total
    h.cod.update_balance("driver-1", 20.0).await.unwrap();
    let settlement = h.cod.process_payment(&order.id).await;
    assert!(!settlement.success);
    assert_eq!(h.cod.balance("driver-1").await.unwrap(), 20.0);
    assert!(h.cod.transactions("driver-1").await.unwrap().is_empty());

    // Order stays unpaid
    let stored = h.workflow.get_order(&order.id).await.unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}
