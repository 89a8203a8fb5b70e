//! Repository for the `outbox_events` table.

use roomdesk_core::entity::EntityKind;
use roomdesk_core::types::DbId;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::models::outbox::{NewOutboxEvent, OutboxEvent};

const COLUMNS: &str = "id, event_id, exchange, routing_key, payload, attempts, last_error, \
                       created_at, published_at";

/// Provides enqueue and delivery bookkeeping for outbox rows.
pub struct OutboxRepo;

impl OutboxRepo {
    /// Insert an outbox row on an open connection, normally the transaction
    /// that inserted the entity itself.
    pub async fn enqueue(
        conn: &mut PgConnection,
        input: &NewOutboxEvent,
    ) -> Result<OutboxEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO outbox_events (event_id, exchange, routing_key, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(input.event_id)
            .bind(&input.exchange)
            .bind(&input.routing_key)
            .bind(&input.payload)
            .fetch_one(conn)
            .await
    }

    /// Serialize `record` into a `<entity>.created` row and enqueue it.
    pub async fn enqueue_created<T: Serialize>(
        conn: &mut PgConnection,
        kind: EntityKind,
        record: &T,
    ) -> Result<OutboxEvent, sqlx::Error> {
        let event =
            NewOutboxEvent::created(kind, record).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        Self::enqueue(conn, &event).await
    }

    /// Unpublished rows that have not exhausted their attempts, oldest first.
    pub async fn list_pending(
        pool: &PgPool,
        max_attempts: i32,
        limit: i64,
    ) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM outbox_events
             WHERE published_at IS NULL AND attempts < $1
             ORDER BY id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(max_attempts)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Stamp a row as published. Returns `false` if it was already stamped.
    pub async fn mark_published(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE outbox_events
             SET published_at = NOW(), attempts = attempts + 1, last_error = NULL
             WHERE id = $1 AND published_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a failed delivery attempt and keep the last error message.
    pub async fn record_failure(pool: &PgPool, id: DbId, error: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE outbox_events
             SET attempts = attempts + 1, last_error = $2
             WHERE id = $1 AND published_at IS NULL",
        )
        .bind(id)
        .bind(error)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
