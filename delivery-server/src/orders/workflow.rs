//! Order workflow coordinator
//!
//! Ties the fee policy, state machine and notification fan-out together.
//! Every operation loads, validates, persists, then notifies; a fee failure
//! aborts creation before anything is persisted, while notification
//! failures never fail the triggering operation.

use crate::core::{AppError, AppResult};
use crate::notify::NotificationRouter;
use crate::orders::money::{percent_of, to_decimal, to_f64};
use crate::orders::state_machine::{apply_assignment, apply_completion, apply_transition};
use crate::pricing::FeePolicy;
use crate::settings::SettingsService;
use crate::store::{AddressLookup, MenuStore, OrderStore, RestaurantStore, UserStore};
use rust_decimal::Decimal;
use shared::fee::{FeeCalculationRequest, FeeCalculationResult, FeeOption};
use shared::models::Restaurant;
use shared::order::{
    CreateOrderInput, Order, OrderFilter, OrderLineItem, OrderStatus, PaymentStatus,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Order workflow coordinator
pub struct OrderWorkflow {
    orders: Arc<dyn OrderStore>,
    restaurants: Arc<dyn RestaurantStore>,
    menu: Arc<dyn MenuStore>,
    addresses: Arc<dyn AddressLookup>,
    users: Arc<dyn UserStore>,
    settings: Arc<SettingsService>,
    router: Arc<NotificationRouter>,
    /// Tax rate applied to the subtotal, in percent
    tax_rate_percent: f64,
}

impl OrderWorkflow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        orders: Arc<dyn OrderStore>,
        restaurants: Arc<dyn RestaurantStore>,
        menu: Arc<dyn MenuStore>,
        addresses: Arc<dyn AddressLookup>,
        users: Arc<dyn UserStore>,
        settings: Arc<SettingsService>,
        router: Arc<NotificationRouter>,
        tax_rate_percent: f64,
    ) -> Self {
        Self {
            orders,
            restaurants,
            menu,
            addresses,
            users,
            settings,
            router,
            tax_rate_percent,
        }
    }

    /// Create an order
    ///
    /// Line items are snapshotted from the menu, the delivery fee is
    /// computed up front and a fee failure aborts the whole operation - no
    /// partial order is ever persisted. On success the restaurant and the
    /// customer are notified.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, restaurant_id = %input.restaurant_id))]
    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        let restaurant = self.load_restaurant(&input.restaurant_id).await?;
        if !restaurant.is_active {
            return Err(AppError::invalid_operation(format!(
                "Restaurant {} is not accepting orders",
                restaurant.id
            )));
        }

        // Snapshot name and price per line item; menus change, orders don't
        let mut items = Vec::with_capacity(input.items.len());
        let mut subtotal = Decimal::ZERO;
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(AppError::validation(format!(
                    "Invalid quantity {} for menu item {}",
                    item.quantity, item.menu_item_id
                )));
            }
            let menu_item = self
                .menu
                .get_item(&item.menu_item_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Menu item {}", item.menu_item_id)))?;
            if menu_item.restaurant_id != input.restaurant_id {
                return Err(AppError::validation(format!(
                    "Menu item {} does not belong to restaurant {}",
                    menu_item.id, input.restaurant_id
                )));
            }
            if !menu_item.is_available {
                return Err(AppError::invalid_operation(format!(
                    "Menu item {} is currently unavailable",
                    menu_item.name
                )));
            }
            let line = OrderLineItem {
                menu_item_id: menu_item.id,
                name: menu_item.name,
                quantity: item.quantity,
                unit_price: menu_item.price,
                special_instructions: item.special_instructions.clone(),
            };
            subtotal += to_decimal(line.line_total());
            items.push(line);
        }
        let subtotal = to_f64(subtotal);

        // Fee failure aborts creation before anything is persisted
        let address = self.addresses.get_address(&input.delivery_address_id).await?;
        let fee_request = FeeCalculationRequest {
            restaurant_id: input.restaurant_id.clone(),
            customer_address_id: input.delivery_address_id.clone(),
            order_amount: subtotal,
            is_rush_delivery: input.is_rush_delivery,
            preferred_delivery_time: None,
        };
        let fee = FeePolicy::calculate(
            &fee_request,
            &restaurant,
            address.as_ref(),
            &self.settings.snapshot(),
        )?;

        let tax = percent_of(subtotal, self.tax_rate_percent);
        let total_amount =
            to_f64(to_decimal(subtotal) + to_decimal(fee.delivery_fee) + to_decimal(tax));

        let now = chrono::Utc::now().timestamp_millis();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id: input.customer_id,
            restaurant_id: input.restaurant_id,
            delivery_person_id: None,
            items,
            subtotal,
            delivery_fee: fee.delivery_fee,
            tax,
            total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: input.payment_method,
            delivery_address_id: input.delivery_address_id,
            estimated_delivery_minutes: Some(fee.eta_minutes),
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert(order.clone()).await?;

        info!(
            order_id = %order.id,
            subtotal,
            delivery_fee = fee.delivery_fee,
            total = total_amount,
            "Order created"
        );
        self.router.notify_new_order(&order).await;
        Ok(order)
    }

    /// Fetch a single order
    pub async fn get_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))
    }

    /// List orders matching a filter, newest first
    pub async fn list_orders(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        Ok(self.orders.list(filter).await?)
    }

    /// Apply a status transition, persist and notify
    ///
    /// When `triggered_by` carries an actor id it must resolve to an active
    /// user who either manages orders (owner, admin) or is the courier
    /// assigned to this order. `None` marks a trusted internal caller.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: &str,
        to: OrderStatus,
        triggered_by: Option<&str>,
    ) -> AppResult<Order> {
        let mut order = self.get_order(order_id).await?;
        if let Some(actor_id) = triggered_by {
            self.authorize_status_actor(actor_id, &order).await?;
        }
        let previous = order.status;
        apply_transition(&mut order, to)?;
        self.orders.update(order.clone()).await?;

        info!(order_id, ?previous, ?to, "Order status updated");
        self.router
            .notify_status_change(order_id, previous, to, triggered_by)
            .await;
        Ok(order)
    }

    /// Cancel an order, recording the reason
    ///
    /// Terminal orders (delivered or already cancelled) cannot be cancelled;
    /// the stored order is left unmodified in that case.
    #[instrument(skip(self, reason))]
    pub async fn cancel_order(&self, order_id: &str, reason: Option<String>) -> AppResult<Order> {
        let mut order = self.get_order(order_id).await?;
        if !order.status.is_active() {
            return Err(AppError::invalid_operation(format!(
                "Cannot cancel order in status {:?}",
                order.status
            )));
        }
        let previous = order.status;
        apply_transition(&mut order, OrderStatus::Cancelled)?;
        order.cancellation_reason = reason;
        self.orders.update(order.clone()).await?;

        info!(order_id, ?previous, "Order cancelled");
        self.router
            .notify_status_change(order_id, previous, OrderStatus::Cancelled, None)
            .await;
        Ok(order)
    }

    /// Assign a delivery person to an order that is ready for pickup
    ///
    /// Only legal from `ReadyForDelivery`. Fires the dedicated assignment
    /// notification in addition to the generic status change.
    #[instrument(skip(self))]
    pub async fn assign_delivery_person(
        &self,
        order_id: &str,
        person_id: &str,
    ) -> AppResult<Order> {
        let mut order = self.get_order(order_id).await?;
        if order.status != OrderStatus::ReadyForDelivery {
            return Err(AppError::invalid_operation(format!(
                "Cannot assign delivery person to order in status {:?}",
                order.status
            )));
        }
        let previous = order.status;
        apply_assignment(&mut order, person_id)?;
        self.orders.update(order.clone()).await?;

        info!(order_id, person_id, "Delivery person assigned");
        self.router.notify_delivery_assignment(order_id, person_id).await;
        self.router
            .notify_status_change(order_id, previous, OrderStatus::Delivering, Some(person_id))
            .await;
        Ok(order)
    }

    /// Complete a delivery; only the assigned courier may do so
    #[instrument(skip(self))]
    pub async fn complete_delivery(
        &self,
        order_id: &str,
        acting_person_id: &str,
    ) -> AppResult<Order> {
        let mut order = self.get_order(order_id).await?;
        let previous = order.status;
        apply_completion(&mut order, acting_person_id)?;
        self.orders.update(order.clone()).await?;

        info!(order_id, acting_person_id, "Delivery completed");
        self.router
            .notify_status_change(order_id, previous, OrderStatus::Delivered, Some(acting_person_id))
            .await;
        Ok(order)
    }

    /// Preview the delivery fee for a prospective order
    pub async fn calculate_fee(
        &self,
        request: &FeeCalculationRequest,
    ) -> AppResult<FeeCalculationResult> {
        let restaurant = self.load_restaurant(&request.restaurant_id).await?;
        let address = self.addresses.get_address(&request.customer_address_id).await?;
        Ok(FeePolicy::calculate(
            request,
            &restaurant,
            address.as_ref(),
            &self.settings.snapshot(),
        )?)
    }

    /// Quote both delivery options (standard and rush)
    pub async fn fee_options(
        &self,
        request: &FeeCalculationRequest,
    ) -> AppResult<Vec<FeeOption>> {
        let restaurant = self.load_restaurant(&request.restaurant_id).await?;
        let address = self.addresses.get_address(&request.customer_address_id).await?;
        Ok(FeePolicy::fee_options(
            request,
            &restaurant,
            address.as_ref(),
            &self.settings.snapshot(),
        )?)
    }

    async fn authorize_status_actor(&self, actor_id: &str, order: &Order) -> AppResult<()> {
        let actor = self
            .users
            .get(actor_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(format!("Unknown actor {actor_id}")))?;
        if !actor.is_active {
            return Err(AppError::unauthorized(format!(
                "Actor {actor_id} is deactivated"
            )));
        }
        if actor.role.can_manage_orders() || order.is_assigned_to(actor_id) {
            return Ok(());
        }
        Err(AppError::unauthorized(format!(
            "Actor {actor_id} may not update order {}",
            order.id
        )))
    }

    async fn load_restaurant(&self, restaurant_id: &str) -> AppResult<Restaurant> {
        self.restaurants
            .get(restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Restaurant {restaurant_id}")))
    }
}
