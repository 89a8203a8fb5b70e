//! Outbox delivery.
//!
//! [`OutboxDispatcher`] publishes a committed outbox row and writes the
//! outcome back to the row. It never fails the caller: a row that could not
//! be published stays pending and [`OutboxRelay`] retries it on the next
//! poll until `max_attempts` is reached. Each publish is bounded by
//! `publish_timeout`, so a stalled broker cannot hold a request open.

use std::sync::Arc;
use std::time::Duration;

use roomdesk_db::models::outbox::OutboxEvent;
use roomdesk_db::store::OutboxStore;
use tokio_util::sync::CancellationToken;

use crate::publisher::{EventPublisher, OutboundMessage, PublishError};

/// Rows fetched per relay poll.
const RELAY_BATCH_SIZE: i64 = 100;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Published,
    /// The publish failed; the row stays pending with the error recorded.
    Failed,
}

/// Counts from one relay pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayReport {
    pub published: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// OutboxDispatcher
// ---------------------------------------------------------------------------

pub struct OutboxDispatcher {
    publisher: Arc<dyn EventPublisher>,
    outbox: Arc<dyn OutboxStore>,
    max_attempts: i32,
    publish_timeout: Duration,
}

impl OutboxDispatcher {
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        outbox: Arc<dyn OutboxStore>,
        max_attempts: i32,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            publisher,
            outbox,
            max_attempts,
            publish_timeout,
        }
    }

    /// Publish one outbox row and record the outcome.
    ///
    /// Bookkeeping failures are logged; a row that was published but could
    /// not be stamped is simply published again by the relay.
    pub async fn dispatch(&self, event: &OutboxEvent) -> DeliveryOutcome {
        match self.try_publish(event).await {
            Ok(()) => {
                if let Err(e) = self.outbox.mark_published(event.id).await {
                    tracing::warn!(
                        outbox_id = event.id,
                        event_id = %event.event_id,
                        error = %e,
                        "Published event but failed to mark outbox row",
                    );
                }
                DeliveryOutcome::Published
            }
            Err(e) => {
                tracing::warn!(
                    outbox_id = event.id,
                    event_id = %event.event_id,
                    routing_key = %event.routing_key,
                    attempt = event.attempts + 1,
                    error = %e,
                    "Event publish failed, left pending",
                );
                if let Err(db_err) = self.outbox.record_failure(event.id, &e.to_string()).await {
                    tracing::error!(
                        outbox_id = event.id,
                        error = %db_err,
                        "Failed to record outbox delivery failure",
                    );
                }
                DeliveryOutcome::Failed
            }
        }
    }

    async fn try_publish(&self, event: &OutboxEvent) -> Result<(), PublishError> {
        let message = OutboundMessage::from_outbox(event)?;
        tokio::time::timeout(self.publish_timeout, self.publisher.publish(&message))
            .await
            .map_err(|_| PublishError::Timeout(self.publish_timeout))?
    }

    /// Publish every pending row that still has attempts left, oldest first.
    pub async fn relay_pending(&self) -> Result<RelayReport, sqlx::Error> {
        let pending = self
            .outbox
            .pending(self.max_attempts, RELAY_BATCH_SIZE)
            .await?;

        let mut report = RelayReport::default();
        for event in &pending {
            match self.dispatch(event).await {
                DeliveryOutcome::Published => report.published += 1,
                DeliveryOutcome::Failed => report.failed += 1,
            }
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// OutboxRelay
// ---------------------------------------------------------------------------

/// Background service that retries pending outbox rows on a fixed interval.
pub struct OutboxRelay {
    dispatcher: Arc<OutboxDispatcher>,
    interval: Duration,
}

impl OutboxRelay {
    pub fn new(dispatcher: Arc<OutboxDispatcher>, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
        }
    }

    /// Run the relay loop until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);
        tracing::info!(interval_secs = self.interval.as_secs(), "Outbox relay started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Outbox relay cancelled");
                    break;
                }
                _ = interval.tick() => {
                    match self.dispatcher.relay_pending().await {
                        Ok(report) if report.published + report.failed > 0 => {
                            tracing::info!(
                                published = report.published,
                                failed = report.failed,
                                "Relayed pending outbox events",
                            );
                        }
                        Ok(_) => {}
                        Err(e) => tracing::error!(error = %e, "Failed to load pending outbox events"),
                    }
                }
            }
        }
    }
}
