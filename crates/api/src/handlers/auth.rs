//! Handlers for `/auth`: self-service registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roomdesk_db::models::client::Client;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub fname: String,
    pub sname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub client: Client,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state
        .clients
        .register(&input.fname, &input.sname, &input.email, &input.password)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let client = state.clients.authenticate(&input.email, &input.password).await?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(client.id, &client.email, &client.user_role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    tracing::info!(client_id = client.id, "Client logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        client,
    }))
}
