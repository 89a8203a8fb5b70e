//! Outbox rows: notifications persisted alongside the entity they describe
//! and published after the transaction commits.

use roomdesk_core::entity::EntityKind;
use roomdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `outbox_events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OutboxEvent {
    pub id: DbId,
    /// Stable identity of the notification; used as the AMQP message id so
    /// consumers can drop duplicates from at-least-once delivery.
    pub event_id: Uuid,
    pub exchange: String,
    pub routing_key: String,
    pub payload: serde_json::Value,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: Timestamp,
    pub published_at: Option<Timestamp>,
}

impl OutboxEvent {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// Insert DTO for an outbox row.
#[derive(Debug, Clone)]
pub struct NewOutboxEvent {
    pub event_id: Uuid,
    pub exchange: String,
    pub routing_key: String,
    pub payload: serde_json::Value,
}

impl NewOutboxEvent {
    /// `<entity>.created` notification carrying the full created record.
    pub fn created<T: Serialize>(kind: EntityKind, record: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            exchange: kind.exchange().to_string(),
            routing_key: kind.created_routing_key().to_string(),
            payload: serde_json::to_value(record)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Thing {
        id: i64,
        name: &'static str,
    }

    #[test]
    fn created_event_targets_entity_exchange() {
        let event = NewOutboxEvent::created(EntityKind::Room, &Thing { id: 7, name: "Cedar" }).unwrap();
        assert_eq!(event.exchange, "room_exchange");
        assert_eq!(event.routing_key, "room.created");
        assert_eq!(event.payload["id"], 7);
        assert_eq!(event.payload["name"], "Cedar");
    }

    #[test]
    fn each_event_gets_a_fresh_id() {
        let thing = Thing { id: 1, name: "x" };
        let a = NewOutboxEvent::created(EntityKind::Booking, &thing).unwrap();
        let b = NewOutboxEvent::created(EntityKind::Booking, &thing).unwrap();
        assert_ne!(a.event_id, b.event_id);
    }
}
