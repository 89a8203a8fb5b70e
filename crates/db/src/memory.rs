//! In-process store implementing every store trait over `BTreeMap`s.
//!
//! An entity and its outbox row are inserted under one lock, mirroring the
//! transactional insert of [`PgStore`](crate::store::PgStore). Writes can be
//! forced to fail to exercise error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use roomdesk_core::entity::EntityKind;
use roomdesk_core::listing::ListQuery;
use roomdesk_core::types::DbId;
use serde::Serialize;

use crate::models::booking::{Booking, CreateBooking, UpdateBooking};
use crate::models::client::{Client, ClientChanges, NewClient};
use crate::models::outbox::{NewOutboxEvent, OutboxEvent};
use crate::models::room::{CreateRoom, Room, UpdateRoom};
use crate::store::{BookingStore, ClientStore, HealthProbe, OutboxStore, RoomStore};

#[derive(Default)]
struct Tables {
    bookings: BTreeMap<DbId, Booking>,
    clients: BTreeMap<DbId, Client>,
    rooms: BTreeMap<DbId, Room>,
    outbox: BTreeMap<DbId, OutboxEvent>,
    last_booking_id: DbId,
    last_client_id: DbId,
    last_room_id: DbId,
    last_outbox_id: DbId,
}

impl Tables {
    fn enqueue_created<T: Serialize>(
        &mut self,
        kind: EntityKind,
        record: &T,
    ) -> Result<OutboxEvent, sqlx::Error> {
        let new =
            NewOutboxEvent::created(kind, record).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        self.last_outbox_id += 1;
        let event = OutboxEvent {
            id: self.last_outbox_id,
            event_id: new.event_id,
            exchange: new.exchange,
            routing_key: new.routing_key,
            payload: new.payload,
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
            published_at: None,
        };
        self.outbox.insert(event.id, event.clone());
        Ok(event)
    }
}

/// Thread-safe in-memory store. Identifiers start at 1 per table.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every create, update and delete fails with
    /// `PoolTimedOut` and leaves the tables untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every outbox row, in insertion order.
    pub fn outbox_events(&self) -> Vec<OutboxEvent> {
        match self.tables.lock() {
            Ok(tables) => tables.outbox.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().outbox.values().cloned().collect(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, sqlx::Error> {
        self.tables
            .lock()
            .map_err(|_| sqlx::Error::Protocol("memory store lock poisoned".into()))
    }

    fn lock_for_write(&self) -> Result<MutexGuard<'_, Tables>, sqlx::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.lock()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create(&self, input: &CreateBooking) -> Result<(Booking, OutboxEvent), sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        let booking = Booking::from_create(tables.last_booking_id + 1, input);
        let event = tables.enqueue_created(EntityKind::Booking, &booking)?;
        tables.last_booking_id = booking.id;
        tables.bookings.insert(booking.id, booking.clone());
        Ok((booking, event))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        Ok(self.lock()?.bookings.get(&id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        Ok(tables.bookings.get_mut(&id).map(|booking| {
            booking.apply_update(input);
            booking.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.lock_for_write()?.bookings.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Booking>, sqlx::Error> {
        let tables = self.lock()?;
        Ok(query.apply(tables.bookings.values().cloned()))
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn create(&self, input: &NewClient) -> Result<(Client, OutboxEvent), sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        let client = Client::from_new(tables.last_client_id + 1, input, Utc::now());
        let event = tables.enqueue_created(EntityKind::Client, &client)?;
        tables.last_client_id = client.id;
        tables.clients.insert(client.id, client.clone());
        Ok((client, event))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        Ok(self.lock()?.clients.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, sqlx::Error> {
        Ok(self
            .lock()?
            .clients
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn update(
        &self,
        id: DbId,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        Ok(tables
            .clients
            .get_mut(&id)
            .filter(|c| c.version == changes.expected_version)
            .map(|client| {
                client.apply_changes(changes);
                client.clone()
            }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.lock_for_write()?.clients.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Client>, sqlx::Error> {
        let tables = self.lock()?;
        Ok(query.apply(tables.clients.values().cloned()))
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn create(&self, input: &CreateRoom) -> Result<(Room, OutboxEvent), sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        let room = Room::from_create(tables.last_room_id + 1, input);
        let event = tables.enqueue_created(EntityKind::Room, &room)?;
        tables.last_room_id = room.id;
        tables.rooms.insert(room.id, room.clone());
        Ok((room, event))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        Ok(self.lock()?.rooms.get(&id).cloned())
    }

    async fn update(&self, id: DbId, input: &UpdateRoom) -> Result<Option<Room>, sqlx::Error> {
        let mut tables = self.lock_for_write()?;
        Ok(tables.rooms.get_mut(&id).map(|room| {
            room.apply_update(input);
            room.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.lock_for_write()?.rooms.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Room>, sqlx::Error> {
        let tables = self.lock()?;
        Ok(query.apply(tables.rooms.values().cloned()))
    }
}

#[async_trait]
impl OutboxStore for MemoryStore {
    async fn pending(
        &self,
        max_attempts: i32,
        limit: i64,
    ) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        let tables = self.lock()?;
        Ok(tables
            .outbox
            .values()
            .filter(|e| !e.is_published() && e.attempts < max_attempts)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn mark_published(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.lock()?;
        Ok(match tables.outbox.get_mut(&id) {
            Some(event) if !event.is_published() => {
                event.attempts += 1;
                event.last_error = None;
                event.published_at = Some(Utc::now());
                true
            }
            _ => false,
        })
    }

    async fn record_failure(&self, id: DbId, error: &str) -> Result<bool, sqlx::Error> {
        let mut tables = self.lock()?;
        Ok(match tables.outbox.get_mut(&id) {
            Some(event) if !event.is_published() => {
                event.attempts += 1;
                event.last_error = Some(error.to_string());
                true
            }
            _ => false,
        })
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.lock().map(|_| ())
    }
}
