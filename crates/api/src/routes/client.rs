//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                   -> list          (client, admin)
/// POST   /                   -> create        (admin)
/// GET    /by-email?email=    -> get_by_email  (admin)
/// GET    /{id}               -> get_by_id     (client, admin)
/// PUT    /{id}               -> update        (admin)
/// DELETE /{id}               -> delete        (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list).post(client::create))
        .route("/by-email", get(client::get_by_email))
        .route(
            "/{id}",
            get(client::get_by_id)
                .put(client::update)
                .delete(client::delete),
        )
}
