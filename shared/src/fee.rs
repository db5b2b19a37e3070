//! Delivery fee types
//!
//! Settings, city-tier classification and the fee calculation
//! request/result pair. The calculation itself lives in the server's
//! pricing module; these types are the wire contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery settings - process-wide, read-only at request time
///
/// Mutable only through the settings service's reload path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliverySettings {
    /// Base fee for in-town deliveries
    pub in_town_base_fee: f64,
    /// Base fee for out-of-town deliveries
    pub out_of_town_base_fee: f64,
    /// Order amount at or above which delivery is free
    pub free_delivery_threshold: f64,
    /// Flat surcharge for rush delivery
    pub rush_delivery_fee: f64,
    /// Estimated delivery time for rush orders (minutes)
    pub rush_eta_minutes: u32,
    /// Estimated delivery time for standard orders (minutes)
    pub standard_eta_minutes: u32,
    /// Minimum order amount for delivery
    pub minimum_order_amount: f64,
    /// Maximum deliverable distance (km)
    pub max_delivery_distance_km: f64,
    /// Distance at or below which an address counts as in-town (km)
    pub in_town_distance_km: f64,
    /// Per-km rate for the out-of-town stretch beyond the in-town radius
    pub out_of_town_rate_per_km: f64,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            in_town_base_fee: 3.0,
            out_of_town_base_fee: 6.0,
            free_delivery_threshold: 50.0,
            rush_delivery_fee: 5.0,
            rush_eta_minutes: 25,
            standard_eta_minutes: 45,
            minimum_order_amount: 10.0,
            max_delivery_distance_km: 20.0,
            in_town_distance_km: 5.0,
            out_of_town_rate_per_km: 2.0,
        }
    }
}

/// City tier - distance classification relative to the restaurant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CityTier {
    InTown,
    OutOfTown,
}

impl CityTier {
    /// Multiplier applied to a restaurant's custom base fee
    pub fn multiplier(&self) -> f64 {
        match self {
            CityTier::InTown => 1.0,
            CityTier::OutOfTown => 1.5,
        }
    }
}

/// Fee calculation request (transient, never persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeCalculationRequest {
    pub restaurant_id: String,
    pub customer_address_id: String,
    /// Order subtotal the fee is being quoted for
    pub order_amount: f64,
    #[serde(default)]
    pub is_rush_delivery: bool,
    /// Preferred delivery time (epoch millis), informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_delivery_time: Option<i64>,
}

/// Per-component fee breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeBreakdown {
    pub base_fee: f64,
    pub distance_fee: f64,
    pub rush_fee: f64,
    /// City-tier multiplier applied to the component sum
    ///
    /// Always 1.0 today (the base fee already encodes the tier); kept as an
    /// explicit factor for extensibility.
    pub multiplier: f64,
    /// Discount applied (the waived base fee on free delivery)
    pub discount: f64,
    pub final_fee: f64,
}

/// Fee calculation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeCalculationResult {
    /// Final fee to charge
    pub delivery_fee: f64,
    /// Base fee before distance/rush components
    pub base_fee: f64,
    /// Great-circle distance restaurant → customer (km)
    pub distance_km: f64,
    pub city_tier: CityTier,
    pub is_free_delivery: bool,
    /// Human-readable reason when delivery is free
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_delivery_reason: Option<String>,
    pub is_rush_delivery: bool,
    /// Estimated delivery time (minutes)
    pub eta_minutes: u32,
    pub breakdown: FeeBreakdown,
}

/// Fee calculation failure codes
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeError {
    #[error("Restaurant location missing")]
    RestaurantLocationMissing,
    #[error("Customer address missing")]
    CustomerAddressMissing,
    #[error("Order amount below minimum ({minimum:.2})")]
    MinimumOrderNotMet { minimum: f64 },
    #[error("Delivery distance {distance_km:.1} km exceeds maximum {max_km:.1} km")]
    DeliveryDistanceExceeded { distance_km: f64, max_km: f64 },
}

impl FeeError {
    /// Stable wire code for this failure
    pub fn code(&self) -> &'static str {
        match self {
            FeeError::RestaurantLocationMissing => "RESTAURANT_LOCATION_MISSING",
            FeeError::CustomerAddressMissing => "CUSTOMER_ADDRESS_MISSING",
            FeeError::MinimumOrderNotMet { .. } => "MINIMUM_ORDER_NOT_MET",
            FeeError::DeliveryDistanceExceeded { .. } => "DELIVERY_DISTANCE_EXCEEDED",
        }
    }
}

/// A single quote in the fee-options response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeOption {
    /// "STANDARD" or "RUSH"
    pub kind: String,
    pub delivery_fee: f64,
    pub eta_minutes: u32,
    pub is_free_delivery: bool,
}
