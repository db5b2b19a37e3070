use delivery_server::store::{
    MemoryAddressLookup, MemoryCodStore, MemoryMenuStore, MemoryOrderStore, MemoryRestaurantStore,
    MemoryUserStore,
};
use delivery_server::notify::InProcessRealtimeChannel;
use delivery_server::notify::channels::{ChannelError, PushChannel};
use delivery_server::{
    CodService, Config, NotificationRouter, OrderWorkflow, SettingsService, init_logger_with_file,
};
use std::sync::Arc;

/// Push channel placeholder until a provider is wired in; logs and drops.
struct LoggingPushChannel;

#[async_trait::async_trait]
impl PushChannel for LoggingPushChannel {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        _body: &str,
        _data: serde_json::Value,
    ) -> Result<(), ChannelError> {
        tracing::debug!(device_token, title, "Push notification (no provider configured)");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment and logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        tax_rate_percent = config.tax_rate_percent,
        "Delivery server starting"
    );

    // 2. Stores and settings snapshot
    let orders = Arc::new(MemoryOrderStore::new());
    let restaurants = Arc::new(MemoryRestaurantStore::new());
    let menu = Arc::new(MemoryMenuStore::new());
    let addresses = Arc::new(MemoryAddressLookup::new());
    let users = Arc::new(MemoryUserStore::new());
    let ledger = Arc::new(MemoryCodStore::new());
    let settings = Arc::new(SettingsService::new(config.delivery.clone()));

    // 3. Notification fan-out
    let realtime = Arc::new(InProcessRealtimeChannel::new());
    let router = Arc::new(NotificationRouter::new(
        orders.clone(),
        restaurants.clone(),
        users.clone(),
        realtime,
        Arc::new(LoggingPushChannel),
    ));

    // 4. Services
    let _workflow = OrderWorkflow::new(
        orders.clone(),
        restaurants,
        menu,
        addresses,
        users,
        settings,
        router,
        config.tax_rate_percent,
    );
    let _cod = CodService::new(orders, ledger);

    tracing::info!("Delivery server ready");

    // 5. Run until interrupted; the transport layer mounts on top of the
    //    workflow/cod services
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
