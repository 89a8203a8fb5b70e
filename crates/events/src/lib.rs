//! Create-event notifications for the roomdesk services.
//!
//! - [`EventPublisher`]: the broker seam, with [`AmqpPublisher`] for RabbitMQ
//!   and [`RecordingPublisher`] / [`DisabledPublisher`] for tests and for
//!   deployments without a broker.
//! - [`OutboxDispatcher`]: publishes committed outbox rows and records the
//!   outcome on each row.
//! - [`OutboxRelay`]: background loop that retries rows still pending.

pub mod amqp;
pub mod memory;
pub mod outbox;
pub mod publisher;

pub use amqp::{AmqpConfig, AmqpPublisher};
pub use memory::{DisabledPublisher, RecordingPublisher};
pub use outbox::{DeliveryOutcome, OutboxDispatcher, OutboxRelay, RelayReport};
pub use publisher::{EventPublisher, OutboundMessage, PublishError};
