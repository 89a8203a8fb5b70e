//! Publisher trait and the message it carries.

use std::time::Duration;

use async_trait::async_trait;
use roomdesk_db::models::outbox::OutboxEvent;
use uuid::Uuid;

/// Content type of every published body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// No connection or channel could be obtained from the broker.
    #[error("Broker connection failed: {0}")]
    Connection(String),

    /// The target exchange could not be declared.
    #[error("Exchange declaration failed: {0}")]
    Declare(String),

    /// The broker refused or dropped the message.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// The broker did not answer within the dispatcher's publish bound.
    #[error("Publish timed out after {0:?}")]
    Timeout(Duration),

    #[error("Payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A JSON body addressed to a topic exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    /// Carried as the AMQP `message_id`; equal to the outbox `event_id`.
    pub message_id: Uuid,
    pub exchange: String,
    pub routing_key: String,
    pub body: Vec<u8>,
}

impl OutboundMessage {
    pub fn from_outbox(event: &OutboxEvent) -> Result<Self, PublishError> {
        Ok(Self {
            message_id: event.event_id,
            exchange: event.exchange.clone(),
            routing_key: event.routing_key.clone(),
            body: serde_json::to_vec(&event.payload)?,
        })
    }

    /// Decode the body back into JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Sends one message to a broker. Implementations must be idempotent with
/// respect to exchange setup; callers do not await consumer acknowledgement.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, message: &OutboundMessage) -> Result<(), PublishError>;
}
