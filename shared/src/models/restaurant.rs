//! Restaurant model

use super::address::Coordinates;
use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Owner user id (receives restaurant-side notifications)
    pub owner_id: String,
    /// Restaurant location; missing for restaurants that have not completed
    /// onboarding - fee calculation fails explicitly in that case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    /// Restaurant-specific delivery base fee. `None` means "use the system
    /// default for the city tier".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_delivery_fee: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

impl Restaurant {
    /// Effective custom fee, if one is set
    ///
    /// Legacy records store "unset" as 0.0; normalize that to `None` here so
    /// the rest of the code never sees the sentinel.
    pub fn custom_fee(&self) -> Option<f64> {
        match self.custom_delivery_fee {
            Some(fee) if fee > 0.0 => Some(fee),
            _ => None,
        }
    }
}
