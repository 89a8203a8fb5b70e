use std::sync::Arc;

use roomdesk_db::store::{BookingStore, ClientStore, HealthProbe, RoomStore};
use roomdesk_events::OutboxDispatcher;

use crate::config::ServerConfig;
use crate::services::{BookingService, ClientService, RoomService};

/// Shared application state available to all Axum handlers via `State<AppState>`
/// and held by the gRPC services.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Database liveness for `GET /health`.
    pub health: Arc<dyn HealthProbe>,
    pub bookings: Arc<BookingService>,
    pub clients: Arc<ClientService>,
    pub rooms: Arc<RoomService>,
}

impl AppState {
    /// Wire every service over one store and one outbox dispatcher.
    pub fn new<S>(config: Arc<ServerConfig>, store: Arc<S>, dispatcher: Arc<OutboxDispatcher>) -> Self
    where
        S: BookingStore + ClientStore + RoomStore + HealthProbe + 'static,
    {
        Self {
            bookings: Arc::new(BookingService::new(store.clone(), dispatcher.clone())),
            clients: Arc::new(ClientService::new(store.clone(), dispatcher.clone())),
            rooms: Arc::new(RoomService::new(store.clone(), dispatcher)),
            health: store,
            config,
        }
    }
}
