//! Delivery fee pricing
//!
//! - **distance**: haversine great-circle distance
//! - **calculator**: the fee policy (city tier, base/distance/rush
//!   components, free delivery, post-hoc validation)

pub mod calculator;
pub mod distance;

pub use calculator::FeePolicy;
pub use distance::distance_km;
