//! Route definitions for the `/bookings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /        -> list       (client, admin)
/// POST   /        -> create     (client, admin)
/// GET    /{id}    -> get_by_id  (client, admin)
/// PUT    /{id}    -> update     (admin)
/// DELETE /{id}    -> delete     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list).post(booking::create))
        .route(
            "/{id}",
            get(booking::get_by_id)
                .put(booking::update)
                .delete(booking::delete),
        )
}
