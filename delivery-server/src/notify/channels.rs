//! Notification channel collaborators
//!
//! The realtime and push channels are external systems behind traits. An
//! in-process broadcast-backed realtime channel is provided for tests and
//! single-process wiring; real deployments plug in their hub/provider
//! implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Channel dispatch errors
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Recipient unreachable: {0}")]
    Unreachable(String),

    #[error("Channel send failed: {0}")]
    SendFailed(String),
}

/// Realtime channel - session/group addressed push (dashboard, app sockets)
#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Send an event to every member of a group
    async fn send_to_group(
        &self,
        group_key: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError>;

    /// Send an event to a single connected user
    async fn send_to_user(
        &self,
        user_id: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError>;
}

/// Mobile push channel - device-token addressed
#[async_trait]
pub trait PushChannel: Send + Sync {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: Value,
    ) -> Result<(), ChannelError>;
}

/// A message flowing through the in-process realtime channel
#[derive(Debug, Clone)]
pub struct RealtimeMessage {
    /// Group key, or `user:{id}` for direct sends
    pub target: String,
    pub event: String,
    pub payload: Value,
}

/// Realtime channel event channel capacity
const CHANNEL_CAPACITY: usize = 1024;

/// In-process realtime channel backed by a tokio broadcast channel
///
/// Subscribers receive every message and filter by target themselves,
/// mirroring how a hub fans out to groups.
#[derive(Debug, Clone)]
pub struct InProcessRealtimeChannel {
    tx: Arc<broadcast::Sender<RealtimeMessage>>,
}

impl InProcessRealtimeChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to the message stream
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeMessage> {
        self.tx.subscribe()
    }
}

impl Default for InProcessRealtimeChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeChannel for InProcessRealtimeChannel {
    async fn send_to_group(
        &self,
        group_key: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError> {
        // send() only fails with zero receivers; that is not an error for a
        // broadcast-style channel
        let _ = self.tx.send(RealtimeMessage {
            target: group_key.to_string(),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }

    async fn send_to_user(
        &self,
        user_id: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError> {
        let _ = self.tx.send(RealtimeMessage {
            target: format!("user:{user_id}"),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }
}
