//! Server configuration
//!
//! # Environment variables
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | ENVIRONMENT | development | Runtime environment |
//! | LOG_LEVEL | info | Tracing level |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |
//! | TAX_RATE_PERCENT | 8.0 | Fixed order tax rate |
//! | FREE_DELIVERY_THRESHOLD | 50.0 | Order amount for free delivery |
//! | IN_TOWN_BASE_FEE | 3.0 | In-town base fee |
//! | OUT_OF_TOWN_BASE_FEE | 6.0 | Out-of-town base fee |
//! | IN_TOWN_DISTANCE_KM | 5.0 | In-town radius |
//! | OUT_OF_TOWN_RATE_PER_KM | 2.0 | Per-km rate beyond the radius |
//! | MAX_DELIVERY_DISTANCE_KM | 20.0 | Hard delivery distance cap |
//! | MINIMUM_ORDER_AMOUNT | 10.0 | Minimum order for delivery |
//! | RUSH_DELIVERY_FEE | 5.0 | Rush surcharge |

use shared::fee::DeliverySettings;

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Tracing level
    pub log_level: String,
    /// Optional log file directory (daily rolling)
    pub log_dir: Option<String>,
    /// Fixed tax rate applied to order subtotals (percent)
    pub tax_rate_percent: f64,
    /// Initial delivery settings snapshot
    pub delivery: DeliverySettings,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = DeliverySettings::default();
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            tax_rate_percent: env_f64("TAX_RATE_PERCENT", 8.0),
            delivery: DeliverySettings {
                in_town_base_fee: env_f64("IN_TOWN_BASE_FEE", defaults.in_town_base_fee),
                out_of_town_base_fee: env_f64(
                    "OUT_OF_TOWN_BASE_FEE",
                    defaults.out_of_town_base_fee,
                ),
                free_delivery_threshold: env_f64(
                    "FREE_DELIVERY_THRESHOLD",
                    defaults.free_delivery_threshold,
                ),
                rush_delivery_fee: env_f64("RUSH_DELIVERY_FEE", defaults.rush_delivery_fee),
                rush_eta_minutes: env_u32("RUSH_ETA_MINUTES", defaults.rush_eta_minutes),
                standard_eta_minutes: env_u32(
                    "STANDARD_ETA_MINUTES",
                    defaults.standard_eta_minutes,
                ),
                minimum_order_amount: env_f64(
                    "MINIMUM_ORDER_AMOUNT",
                    defaults.minimum_order_amount,
                ),
                max_delivery_distance_km: env_f64(
                    "MAX_DELIVERY_DISTANCE_KM",
                    defaults.max_delivery_distance_km,
                ),
                in_town_distance_km: env_f64("IN_TOWN_DISTANCE_KM", defaults.in_town_distance_km),
                out_of_town_rate_per_km: env_f64(
                    "OUT_OF_TOWN_RATE_PER_KM",
                    defaults.out_of_town_rate_per_km,
                ),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
