//! Bearer-token authentication for gRPC.

use std::sync::Arc;

use roomdesk_core::roles::Role;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::auth::jwt::JwtConfig;
use crate::error::AppError;
use crate::middleware::auth::{principal_from_bearer, Principal};

/// Decodes the `authorization` metadata entry and stores the resulting
/// [`Principal`] in the request extensions. Calls without a valid token are
/// rejected with `UNAUTHENTICATED` before reaching the service.
#[derive(Clone)]
pub struct AuthInterceptor {
    jwt: Arc<JwtConfig>,
}

impl AuthInterceptor {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt: Arc::new(jwt) }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let header = request
            .metadata()
            .get("authorization")
            .and_then(|v| v.to_str().ok());
        let principal = principal_from_bearer(header, &self.jwt).map_err(AppError::from)?;

        request.extensions_mut().insert(principal);
        Ok(request)
    }
}

/// Require one of `roles` on a request that passed [`AuthInterceptor`].
pub(crate) fn authorize<T>(
    request: &Request<T>,
    roles: &[Role],
    message: &str,
) -> Result<Principal, Status> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| Status::unauthenticated("Missing Authorization header"))?;
    principal
        .require_any(roles, message)
        .map_err(AppError::from)?;
    Ok(principal)
}

#[cfg(test)]
mod tests {
    use roomdesk_core::roles::{READ_ROLES, WRITE_ROLES};

    use super::*;
    use crate::auth::jwt::generate_access_token;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "grpc-interceptor-secret".to_string(),
            access_token_expiry_mins: 5,
        }
    }

    fn request_with(header: Option<&str>) -> Request<()> {
        let mut request = Request::new(());
        if let Some(value) = header {
            request
                .metadata_mut()
                .insert("authorization", value.parse().unwrap());
        }
        request
    }

    #[test]
    fn valid_token_attaches_principal() {
        let token = generate_access_token(3, "c@example.com", "client", &jwt()).unwrap();
        let mut interceptor = AuthInterceptor::new(jwt());

        let request = interceptor
            .call(request_with(Some(&format!("Bearer {token}"))))
            .unwrap();

        let principal = authorize(&request, READ_ROLES, "denied").unwrap();
        assert_eq!(principal.client_id, 3);
        assert_eq!(principal.role, Role::Client);
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let mut interceptor = AuthInterceptor::new(jwt());
        let status = interceptor.call(request_with(None)).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn garbage_token_is_unauthenticated() {
        let mut interceptor = AuthInterceptor::new(jwt());
        let status = interceptor
            .call(request_with(Some("Bearer not-a-jwt")))
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn client_role_cannot_write() {
        let token = generate_access_token(3, "c@example.com", "client", &jwt()).unwrap();
        let mut interceptor = AuthInterceptor::new(jwt());
        let request = interceptor
            .call(request_with(Some(&format!("Bearer {token}"))))
            .unwrap();

        let status = authorize(&request, WRITE_ROLES, "Admin role required").unwrap_err();
        assert_eq!(status.code(), tonic::Code::PermissionDenied);
        assert_eq!(status.message(), "Admin role required");
    }

    #[test]
    fn request_without_interceptor_is_unauthenticated() {
        let status = authorize(&Request::new(()), READ_ROLES, "denied").unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }
}
