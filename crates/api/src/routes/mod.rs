pub mod auth;
pub mod booking;
pub mod client;
pub mod health;
pub mod room;

use axum::Router;
use roomdesk_core::entity::EntityKind;

use crate::state::AppState;

/// Build the route tree served by one service process.
///
/// ```text
/// booking service   /bookings, /bookings/{id}
/// client service    /clients, /clients/by-email, /clients/{id}
///                   /auth/register, /auth/login
/// room service      /rooms, /rooms/{id}
/// ```
///
/// `/health` is mounted separately by the app router.
pub fn api_routes(service: EntityKind) -> Router<AppState> {
    match service {
        EntityKind::Booking => Router::new().nest("/bookings", booking::router()),
        EntityKind::Client => Router::new()
            .nest("/clients", client::router())
            .nest("/auth", auth::router()),
        EntityKind::Room => Router::new().nest("/rooms", room::router()),
    }
}
