//! Publishers that never touch a broker.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::publisher::{EventPublisher, OutboundMessage, PublishError};

/// Accepts and drops every message. Used when `MESSAGING_ENABLED=false`.
#[derive(Debug, Default)]
pub struct DisabledPublisher;

#[async_trait]
impl EventPublisher for DisabledPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<(), PublishError> {
        tracing::debug!(
            routing_key = %message.routing_key,
            message_id = %message.message_id,
            "Messaging disabled, dropping event",
        );
        Ok(())
    }
}

/// Keeps every accepted message in memory. Can be switched to fail or to
/// stall before answering.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    messages: Mutex<Vec<OutboundMessage>>,
    failing: AtomicBool,
    delay_ms: AtomicU64,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// While `true`, every publish fails with [`PublishError::Connection`]
    /// and nothing is recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Sleep this long before answering each publish. `Duration::ZERO` turns
    /// the stall off.
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Messages accepted so far, in publish order.
    pub fn published(&self) -> Vec<OutboundMessage> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<(), PublishError> {
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(PublishError::Connection("broker unavailable".to_string()));
        }
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| PublishError::Publish("recorder lock poisoned".to_string()))?;
        messages.push(message.clone());
        Ok(())
    }
}
