//! Route definitions for the `/rooms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET    /        -> list       (client, admin)
/// POST   /        -> create     (admin)
/// GET    /{id}    -> get_by_id  (client, admin)
/// PUT    /{id}    -> update     (admin)
/// DELETE /{id}    -> delete     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list).post(room::create))
        .route(
            "/{id}",
            get(room::get_by_id).put(room::update).delete(room::delete),
        )
}
