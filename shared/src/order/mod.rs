//! Order domain types
//!
//! - **status**: order/payment status enums and the legal transition table
//! - **types**: the order model, line items and request-side inputs

pub mod status;
pub mod types;

pub use status::{OrderStatus, PaymentMethod, PaymentStatus};
pub use types::{CreateOrderInput, Order, OrderFilter, OrderItemInput, OrderLineItem};
