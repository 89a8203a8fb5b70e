use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` while the database is unreachable.
    pub status: &'static str,
    /// Which entity this process serves (`"booking"`, `"client"`, `"room"`).
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always 200 so load balancers can tell a degraded process from a dead one.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.health.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: state.config.service.key(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Public, no token required.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
