//! Shared types for the delivery platform
//!
//! Common types used across crates: order models and status enums,
//! delivery-fee types, notification envelopes, COD ledger types and
//! user/restaurant models.

pub mod cod;
pub mod fee;
pub mod models;
pub mod notify;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Order re-exports (for convenient access)
pub use order::{Order, OrderStatus, PaymentStatus};

// Fee re-exports
pub use fee::{CityTier, DeliverySettings, FeeCalculationRequest, FeeCalculationResult};
