//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`Principal`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomdesk_core::roles::{READ_ROLES, WRITE_ROLES};

use super::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Message used for admin-only rejections on both transports.
pub const ADMIN_REQUIRED: &str = "Admin role required";

/// Message used for client-or-admin rejections on both transports.
pub const CLIENT_REQUIRED: &str = "Client or Admin role required";

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(principal): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Principal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        principal.require_any(WRITE_ROLES, ADMIN_REQUIRED)?;
        Ok(RequireAdmin(principal))
    }
}

/// Requires `client` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireClient(pub Principal);

impl FromRequestParts<AppState> for RequireClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        principal.require_any(READ_ROLES, CLIENT_REQUIRED)?;
        Ok(RequireClient(principal))
    }
}
