//! Handlers for the `/bookings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roomdesk_core::types::DbId;
use roomdesk_db::models::booking::{Booking, CreateBooking, UpdateBooking};

use super::list_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireClient};
use crate::state::AppState;

/// POST /bookings
pub async fn create(
    RequireClient(principal): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    tracing::debug!(client_id = principal.client_id, "Creating booking");
    let booking = state.bookings.create(&input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
pub async fn list(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.bookings.list(&list_request(params)).await?;
    Ok(Json(bookings))
}

/// GET /bookings/{id}
pub async fn get_by_id(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    Ok(Json(state.bookings.get(id).await?))
}

/// PUT /bookings/{id}
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBooking>,
) -> AppResult<Json<Booking>> {
    Ok(Json(state.bookings.update(id, &input).await?))
}

/// DELETE /bookings/{id}
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
