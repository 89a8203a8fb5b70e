//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roomdesk_core::types::DbId;
use roomdesk_db::models::client::{Client, CreateClient, UpdateClient};
use serde::Deserialize;

use super::list_request;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireClient};
use crate::state::AppState;

/// Query parameters for `GET /clients/by-email`.
#[derive(Debug, Deserialize)]
pub struct EmailParams {
    pub email: String,
}

/// POST /clients
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state.clients.create(&input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /clients
pub async fn list(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Client>>> {
    Ok(Json(state.clients.list(&list_request(params)).await?))
}

/// GET /clients/{id}
pub async fn get_by_id(
    RequireClient(_): RequireClient,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    Ok(Json(state.clients.get(id).await?))
}

/// GET /clients/by-email?email=
pub async fn get_by_email(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> AppResult<Json<Client>> {
    Ok(Json(state.clients.get_by_email(&params.email).await?))
}

/// PUT /clients/{id}
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    Ok(Json(state.clients.update(id, &input).await?))
}

/// DELETE /clients/{id}
pub async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
