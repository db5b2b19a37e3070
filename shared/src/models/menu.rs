//! Menu item model

use serde::{Deserialize, Serialize};

/// Menu item - priced entry on a restaurant's menu
///
/// Orders snapshot the name and price at creation time; later menu edits
/// never change an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub is_available: bool,
}
