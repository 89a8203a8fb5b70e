//! Handlers for the `/rooms` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roomdesk_core::types::DbId;
use roomdesk_db::models::room::{CreateRoom, Room, UpdateRoom};

use super::list_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireClient};
use crate::state::AppState;

/// POST /rooms
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    let room = state.rooms.create(&input).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /rooms
pub async fn list(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Room>>> {
    Ok(Json(state.rooms.list(&list_request(params)).await?))
}

/// GET /rooms/{id}
pub async fn get_by_id(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Room>> {
    Ok(Json(state.rooms.get(id).await?))
}

/// PUT /rooms/{id}
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    Ok(Json(state.rooms.update(id, &input).await?))
}

/// DELETE /rooms/{id}
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
