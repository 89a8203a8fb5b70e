//! Store traits consumed by the service layer.
//!
//! The services hold `Arc<dyn XStore>` so the same business logic runs over
//! Postgres in production and over [`MemoryStore`](crate::memory::MemoryStore)
//! in tests. Every create returns the outbox row written with the entity.

use async_trait::async_trait;
use roomdesk_core::listing::ListQuery;
use roomdesk_core::types::DbId;

use crate::models::booking::{Booking, CreateBooking, UpdateBooking};
use crate::models::client::{Client, ClientChanges, NewClient};
use crate::models::outbox::OutboxEvent;
use crate::models::room::{CreateRoom, Room, UpdateRoom};
use crate::repositories::{BookingRepo, ClientRepo, OutboxRepo, RoomRepo};
use crate::{health_check, DbPool};

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(&self, input: &CreateBooking) -> Result<(Booking, OutboxEvent), sqlx::Error>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, sqlx::Error>;
    async fn update(&self, id: DbId, input: &UpdateBooking)
        -> Result<Option<Booking>, sqlx::Error>;
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list(&self, query: &ListQuery) -> Result<Vec<Booking>, sqlx::Error>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn create(&self, input: &NewClient) -> Result<(Client, OutboxEvent), sqlx::Error>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<Client>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error>;
    /// `None` when the id is absent or the expected version is stale.
    async fn update(
        &self,
        id: DbId,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, sqlx::Error>;
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list(&self, query: &ListQuery) -> Result<Vec<Client>, sqlx::Error>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn create(&self, input: &CreateRoom) -> Result<(Room, OutboxEvent), sqlx::Error>;
    async fn find_by_id(&self, id: DbId) -> Result<Option<Room>, sqlx::Error>;
    async fn update(&self, id: DbId, input: &UpdateRoom) -> Result<Option<Room>, sqlx::Error>;
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn list(&self, query: &ListQuery) -> Result<Vec<Room>, sqlx::Error>;
}

#[async_trait]
pub trait OutboxStore: Send + Sync {
    async fn pending(&self, max_attempts: i32, limit: i64)
        -> Result<Vec<OutboxEvent>, sqlx::Error>;
    async fn mark_published(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn record_failure(&self, id: DbId, error: &str) -> Result<bool, sqlx::Error>;
}

/// Liveness probe for `GET /health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// Store backed by a Postgres pool; delegates to the static repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn create(&self, input: &CreateBooking) -> Result<(Booking, OutboxEvent), sqlx::Error> {
        BookingRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        BookingRepo::find_by_id(&self.pool, id).await
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        BookingRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        BookingRepo::delete(&self.pool, id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Booking>, sqlx::Error> {
        BookingRepo::list(&self.pool, query).await
    }
}

#[async_trait]
impl ClientStore for PgStore {
    async fn create(&self, input: &NewClient) -> Result<(Client, OutboxEvent), sqlx::Error> {
        ClientRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        ClientRepo::find_by_id(&self.pool, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error> {
        ClientRepo::find_by_email(&self.pool, email).await
    }

    async fn update(
        &self,
        id: DbId,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, sqlx::Error> {
        ClientRepo::update(&self.pool, id, changes).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ClientRepo::delete(&self.pool, id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Client>, sqlx::Error> {
        ClientRepo::list(&self.pool, query).await
    }
}

#[async_trait]
impl RoomStore for PgStore {
    async fn create(&self, input: &CreateRoom) -> Result<(Room, OutboxEvent), sqlx::Error> {
        RoomRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        RoomRepo::find_by_id(&self.pool, id).await
    }

    async fn update(&self, id: DbId, input: &UpdateRoom) -> Result<Option<Room>, sqlx::Error> {
        RoomRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        RoomRepo::delete(&self.pool, id).await
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Room>, sqlx::Error> {
        RoomRepo::list(&self.pool, query).await
    }
}

#[async_trait]
impl OutboxStore for PgStore {
    async fn pending(
        &self,
        max_attempts: i32,
        limit: i64,
    ) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        OutboxRepo::list_pending(&self.pool, max_attempts, limit).await
    }

    async fn mark_published(&self, id: DbId) -> Result<bool, sqlx::Error> {
        OutboxRepo::mark_published(&self.pool, id).await
    }

    async fn record_failure(&self, id: DbId, error: &str) -> Result<bool, sqlx::Error> {
        OutboxRepo::record_failure(&self.pool, id, error).await
    }
}

#[async_trait]
impl HealthProbe for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        health_check(&self.pool).await
    }
}
