//! Delivery settings snapshot service
//!
//! Process-wide, read-mostly configuration. Readers take a cheap `Arc`
//! snapshot; an administrative path replaces the whole snapshot through
//! `reload`. Nothing mutates settings in place, so a fee calculation always
//! sees one consistent snapshot.

use parking_lot::RwLock;
use shared::fee::DeliverySettings;
use std::sync::Arc;
use tracing::info;

/// Read-mostly holder of the current [`DeliverySettings`]
#[derive(Debug)]
pub struct SettingsService {
    current: RwLock<Arc<DeliverySettings>>,
}

impl SettingsService {
    pub fn new(settings: DeliverySettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Current settings snapshot
    pub fn snapshot(&self) -> Arc<DeliverySettings> {
        self.current.read().clone()
    }

    /// Replace the snapshot (administrative update path)
    pub fn reload(&self, settings: DeliverySettings) {
        info!(
            free_delivery_threshold = settings.free_delivery_threshold,
            max_distance_km = settings.max_delivery_distance_km,
            "Delivery settings reloaded"
        );
        *self.current.write() = Arc::new(settings);
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new(DeliverySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_replaces_snapshot() {
        let service = SettingsService::default();
        let before = service.snapshot();
        assert_eq!(before.free_delivery_threshold, 50.0);

        let mut updated = DeliverySettings::default();
        updated.free_delivery_threshold = 80.0;
        service.reload(updated);

        assert_eq!(service.snapshot().free_delivery_threshold, 80.0);
        // Old snapshot holders are unaffected
        assert_eq!(before.free_delivery_threshold, 50.0);
    }
}
