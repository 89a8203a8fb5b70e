use std::sync::Arc;

use roomdesk_core::error::CoreError;
use roomdesk_core::listing::ListRequest;
use roomdesk_core::types::DbId;
use roomdesk_db::models::booking::{Booking, CreateBooking, UpdateBooking, BOOKING_FIELDS};
use roomdesk_db::store::BookingStore;
use roomdesk_events::OutboxDispatcher;

use super::parse_list;
use crate::error::AppResult;

const ENTITY: &str = "Booking";

pub struct BookingService {
    store: Arc<dyn BookingStore>,
    dispatcher: Arc<OutboxDispatcher>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, dispatcher: Arc<OutboxDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Insert a booking, then publish its `booking.created` event.
    ///
    /// A publish failure does not fail the call; the event stays in the
    /// outbox for the relay.
    pub async fn create(&self, input: &CreateBooking) -> AppResult<Booking> {
        let (booking, event) = self.store.create(input).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to create booking");
        })?;
        tracing::info!(booking_id = booking.id, "Booking created");

        self.dispatcher.dispatch(&event).await;
        Ok(booking)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Booking> {
        let booking = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        Ok(booking)
    }

    pub async fn update(&self, id: DbId, input: &UpdateBooking) -> AppResult<Booking> {
        let booking = self
            .store
            .update(id, input)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(booking_id = id, "Booking updated");
        Ok(booking)
    }

    /// Deleting an absent booking succeeds.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let deleted = self.store.delete(id).await?;
        tracing::info!(booking_id = id, deleted, "Booking delete");
        Ok(())
    }

    pub async fn list(&self, request: &ListRequest) -> AppResult<Vec<Booking>> {
        let query = parse_list(request, BOOKING_FIELDS)?;
        Ok(self.store.list(&query).await?)
    }
}
