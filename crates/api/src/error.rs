use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roomdesk_core::error::CoreError;
use serde_json::json;

/// Application-level error type shared by the HTTP and gRPC transports.
///
/// Wraps [`CoreError`] for domain errors and adds transport-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses and
/// converts into [`tonic::Status`] for gRPC.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roomdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A lookup by something other than id found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An optimistic-concurrency check failed: the caller's version is stale.
    #[error("Edit conflict: {0}")]
    EditConflict(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler and service return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status, stable error code and client-safe message.
    ///
    /// Internal failures are logged here and replaced by a generic message.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Transport-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::EditConflict(msg) => (StatusCode::CONFLICT, "EDIT_CONFLICT", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        let (_, code, message) = err.classify();
        let code = match code {
            "NOT_FOUND" => tonic::Code::NotFound,
            "VALIDATION_ERROR" | "BAD_REQUEST" => tonic::Code::InvalidArgument,
            "CONFLICT" => tonic::Code::AlreadyExists,
            "EDIT_CONFLICT" => tonic::Code::Aborted,
            "UNAUTHORIZED" => tonic::Code::Unauthenticated,
            "FORBIDDEN" => tonic::Code::PermissionDenied,
            _ => tonic::Code::Internal,
        };
        tonic::Status::new(code, message)
    }
}

/// Map a database failure onto a status, code and client-safe message.
///
/// Only unique violations on `uq_*` constraints are the caller's fault; the
/// email constraint gets the same wording as the service-level duplicate
/// check, so a race between two creates reads the same to both callers.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    const UNIQUE_VIOLATION: &str = "23505";

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            match db_err.constraint() {
                Some("uq_clients_email") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "a client with this email address already exists".to_string(),
                    );
                }
                Some(constraint) if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                _ => {}
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
