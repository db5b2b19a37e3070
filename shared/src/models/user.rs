//! User profile model

use super::role::UserRole;
use serde::{Deserialize, Serialize};

/// User profile as seen by the notification and COD subsystems
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    /// Mobile push device token; absent when the user has no registered
    /// device - push dispatch is skipped silently in that case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}
