//! Delivery fee policy
//!
//! Pure calculation over provided data - callers fetch the restaurant and
//! customer address. All monetary arithmetic goes through the decimal
//! helpers; distances stay in f64.
//!
//! # Algorithm
//!
//! 1. Fail if restaurant location or customer address is missing
//! 2. Haversine distance restaurant → customer
//! 3. Classify city tier by the in-town radius
//! 4. Base fee: restaurant custom fee × tier multiplier, or the system
//!    default for the tier
//! 5. Free delivery short-circuits at the threshold (base fee recorded as
//!    discount; remaining steps skipped)
//! 6. Distance fee for the out-of-town stretch, clamped ≥ 0
//! 7. Rush surcharge when requested
//! 8. Final fee = component sum × multiplier (1.0, tier already in base)
//! 9. Post-hoc validation: minimum order, maximum distance. These run after
//!    the fee is computed but before returning success.

use crate::orders::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::fee::{
    CityTier, DeliverySettings, FeeBreakdown, FeeCalculationRequest, FeeCalculationResult,
    FeeError, FeeOption,
};
use shared::models::{Address, Restaurant};

use super::distance::distance_km;

/// Delivery fee policy
pub struct FeePolicy;

impl FeePolicy {
    /// Calculate the delivery fee for a request
    pub fn calculate(
        request: &FeeCalculationRequest,
        restaurant: &Restaurant,
        customer_address: Option<&Address>,
        settings: &DeliverySettings,
    ) -> Result<FeeCalculationResult, FeeError> {
        // 1. Both endpoints must have coordinates
        let restaurant_location = restaurant
            .location
            .ok_or(FeeError::RestaurantLocationMissing)?;
        let customer = customer_address.ok_or(FeeError::CustomerAddressMissing)?;

        // 2. Distance restaurant → customer
        let distance = distance_km(restaurant_location, customer.coordinates);

        // 3. City tier
        let city_tier = if distance <= settings.in_town_distance_km {
            CityTier::InTown
        } else {
            CityTier::OutOfTown
        };

        // 4. Base fee: restaurant custom fee scales with tier, system
        //    defaults already encode it
        let base_fee = match restaurant.custom_fee() {
            Some(custom) => to_decimal(custom) * to_decimal(city_tier.multiplier()),
            None => to_decimal(match city_tier {
                CityTier::InTown => settings.in_town_base_fee,
                CityTier::OutOfTown => settings.out_of_town_base_fee,
            }),
        };

        let eta_minutes = if request.is_rush_delivery {
            settings.rush_eta_minutes
        } else {
            settings.standard_eta_minutes
        };

        // 5. Free delivery short-circuit
        if request.order_amount >= settings.free_delivery_threshold {
            return Ok(FeeCalculationResult {
                delivery_fee: 0.0,
                base_fee: to_f64(base_fee),
                distance_km: distance,
                city_tier,
                is_free_delivery: true,
                free_delivery_reason: Some(format!(
                    "Order amount {:.2} meets free delivery threshold {:.2}",
                    request.order_amount, settings.free_delivery_threshold
                )),
                is_rush_delivery: request.is_rush_delivery,
                eta_minutes,
                breakdown: FeeBreakdown {
                    base_fee: to_f64(base_fee),
                    distance_fee: 0.0,
                    rush_fee: 0.0,
                    multiplier: 1.0,
                    discount: to_f64(base_fee),
                    final_fee: 0.0,
                },
            });
        }

        // 6. Distance fee for the stretch beyond the in-town radius
        let distance_fee = match city_tier {
            CityTier::InTown => Decimal::ZERO,
            CityTier::OutOfTown => {
                let extra_km = (distance - settings.in_town_distance_km).max(0.0);
                to_decimal(extra_km) * to_decimal(settings.out_of_town_rate_per_km)
            }
        };

        // 7. Rush surcharge
        let rush_fee = if request.is_rush_delivery {
            to_decimal(settings.rush_delivery_fee)
        } else {
            Decimal::ZERO
        };

        // 8. Tier multiplier is an explicit factor for extensibility; the
        //    base fee already encodes the tier, so it is 1.0 today
        let multiplier = Decimal::ONE;
        let final_fee = (base_fee + distance_fee + rush_fee) * multiplier;

        // 9. Post-hoc validation: a fee was computed, but the request still
        //    fails if the order is too small or the customer too far
        if request.order_amount < settings.minimum_order_amount {
            return Err(FeeError::MinimumOrderNotMet {
                minimum: settings.minimum_order_amount,
            });
        }
        if distance > settings.max_delivery_distance_km {
            return Err(FeeError::DeliveryDistanceExceeded {
                distance_km: distance,
                max_km: settings.max_delivery_distance_km,
            });
        }

        Ok(FeeCalculationResult {
            delivery_fee: to_f64(final_fee),
            base_fee: to_f64(base_fee),
            distance_km: distance,
            city_tier,
            is_free_delivery: false,
            free_delivery_reason: None,
            is_rush_delivery: request.is_rush_delivery,
            eta_minutes,
            breakdown: FeeBreakdown {
                base_fee: to_f64(base_fee),
                distance_fee: to_f64(distance_fee),
                rush_fee: to_f64(rush_fee),
                multiplier: 1.0,
                discount: 0.0,
                final_fee: to_f64(final_fee),
            },
        })
    }

    /// Quote both delivery options (standard and rush) for an order amount
    pub fn fee_options(
        request: &FeeCalculationRequest,
        restaurant: &Restaurant,
        customer_address: Option<&Address>,
        settings: &DeliverySettings,
    ) -> Result<Vec<FeeOption>, FeeError> {
        let mut options = Vec::with_capacity(2);
        for (kind, rush) in [("STANDARD", false), ("RUSH", true)] {
            let quote_request = FeeCalculationRequest {
                is_rush_delivery: rush,
                ..request.clone()
            };
            let result =
                Self::calculate(&quote_request, restaurant, customer_address, settings)?;
            options.push(FeeOption {
                kind: kind.to_string(),
                delivery_fee: result.delivery_fee,
                eta_minutes: result.eta_minutes,
                is_free_delivery: result.is_free_delivery,
            });
        }
        Ok(options)
    }
}
