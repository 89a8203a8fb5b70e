//! JWT-based authentication shared by the HTTP extractor and the gRPC
//! interceptor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomdesk_core::error::CoreError;
use roomdesk_core::roles::Role;
use roomdesk_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, decoded from a Bearer token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; prefer the role wrappers in [`super::rbac`] when a
/// specific role is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// The client's database id (from `claims.sub`).
    pub client_id: DbId,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Reject with `Forbidden` unless the principal holds one of `roles`.
    pub fn require_any(&self, roles: &[Role], message: &str) -> Result<(), CoreError> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(message.to_string()))
        }
    }
}

/// Decode an `Authorization` header value into a [`Principal`].
pub fn principal_from_bearer(
    header: Option<&str>,
    jwt: &JwtConfig,
) -> Result<Principal, CoreError> {
    let header =
        header.ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
    })?;

    let claims = validate_token(token, jwt)
        .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

    let role = Role::parse(&claims.role)
        .ok_or_else(|| CoreError::Unauthorized("Token carries an unknown role".into()))?;

    Ok(Principal {
        client_id: claims.sub,
        email: claims.email,
        role,
    })
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        Ok(principal_from_bearer(header, &state.config.jwt)?)
    }
}
