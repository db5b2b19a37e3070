//! Order status state machine
//!
//! Validates and applies status transitions. Two guarded operations layer
//! on top of the generic transition:
//!
//! - assignment: `ReadyForDelivery`/`WaitingCourier → Delivering`,
//!   atomically attaching the courier id
//! - completion: `Delivering → Delivered`, only by the assigned courier

use shared::order::{Order, OrderStatus};
use thiserror::Error;

/// Transition errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition: {from:?} → {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Unauthorized: order is not assigned to this delivery person")]
    Unauthorized,

    #[error("Assignment requires a delivery person id")]
    MissingDeliveryPerson,
}

/// Whether `to` is directly reachable from `from` by a generic transition
///
/// Cancellation is legal from any non-terminal state; everything else
/// follows the forward chain. `ReadyForDelivery → Delivering` is absent on
/// purpose: `Delivering` is entered through [`apply_assignment`], which
/// attaches the courier atomically. `WaitingCourier → Delivering` stays in
/// the table for the courier-pool flow.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match (from, to) {
        (Pending, Confirmed) => true,
        (Confirmed, Preparing) => true,
        (Preparing, ReadyForDelivery) => true,
        (ReadyForDelivery, WaitingCourier) => true,
        (WaitingCourier, Delivering) => true,
        (Delivering, Delivered) => true,
        (from, Cancelled) => !from.is_terminal(),
        _ => false,
    }
}

/// Apply a generic status transition, stamping `updated_at`
///
/// A `Delivering` target additionally requires a courier already attached;
/// orders without one enter `Delivering` through [`apply_assignment`] only.
pub fn apply_transition(order: &mut Order, to: OrderStatus) -> Result<(), TransitionError> {
    if !can_transition(order.status, to) {
        return Err(TransitionError::InvalidTransition {
            from: order.status,
            to,
        });
    }
    if to == OrderStatus::Delivering && order.delivery_person_id.is_none() {
        return Err(TransitionError::MissingDeliveryPerson);
    }
    order.status = to;
    order.touch();
    Ok(())
}

/// Assign a courier and move to `Delivering` in one step
///
/// The courier id is attached atomically with the transition so an order
/// can never be `Delivering` without an assignee. Legal from
/// `ReadyForDelivery` (direct assignment) and `WaitingCourier` (pool
/// pickup).
pub fn apply_assignment(order: &mut Order, person_id: &str) -> Result<(), TransitionError> {
    if person_id.is_empty() {
        return Err(TransitionError::MissingDeliveryPerson);
    }
    if !matches!(
        order.status,
        OrderStatus::ReadyForDelivery | OrderStatus::WaitingCourier
    ) {
        return Err(TransitionError::InvalidTransition {
            from: order.status,
            to: OrderStatus::Delivering,
        });
    }
    order.delivery_person_id = Some(person_id.to_string());
    order.status = OrderStatus::Delivering;
    order.touch();
    Ok(())
}

/// Complete delivery (`Delivering → Delivered`)
///
/// Only the courier the order is assigned to may complete it.
pub fn apply_completion(order: &mut Order, acting_person_id: &str) -> Result<(), TransitionError> {
    if !order.is_assigned_to(acting_person_id) {
        return Err(TransitionError::Unauthorized);
    }
    apply_transition(order, OrderStatus::Delivered)
}
