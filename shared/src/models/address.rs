//! Address model

use serde::{Deserialize, Serialize};

/// Geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Stored delivery address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub street: String,
    pub city: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub is_default: bool,
}
