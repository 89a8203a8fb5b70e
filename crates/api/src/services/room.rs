use std::sync::Arc;

use roomdesk_core::error::CoreError;
use roomdesk_core::listing::ListRequest;
use roomdesk_core::types::DbId;
use roomdesk_db::models::room::{CreateRoom, Room, UpdateRoom, ROOM_FIELDS};
use roomdesk_db::store::RoomStore;
use roomdesk_events::OutboxDispatcher;

use super::parse_list;
use crate::error::AppResult;

const ENTITY: &str = "Room";

pub struct RoomService {
    store: Arc<dyn RoomStore>,
    dispatcher: Arc<OutboxDispatcher>,
}

impl RoomService {
    pub fn new(store: Arc<dyn RoomStore>, dispatcher: Arc<OutboxDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Insert a room, then publish its `room.created` event.
    pub async fn create(&self, input: &CreateRoom) -> AppResult<Room> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation("name must be provided".into()).into());
        }
        let (room, event) = self.store.create(input).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to create room");
        })?;
        tracing::info!(room_id = room.id, "Room created");

        self.dispatcher.dispatch(&event).await;
        Ok(room)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Room> {
        let room = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(room)
    }

    pub async fn update(&self, id: DbId, input: &UpdateRoom) -> AppResult<Room> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation("name must be provided".into()).into());
        }
        let room = self
            .store
            .update(id, input)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(room_id = id, "Room updated");
        Ok(room)
    }

    /// Deleting an absent room succeeds.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let deleted = self.store.delete(id).await?;
        tracing::info!(room_id = id, deleted, "Room delete");
        Ok(())
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Vec<Room>> {
        let query = parse_list(request, ROOM_FIELDS)?;
        Ok(self.store.list(&query).await?)
    }
}
