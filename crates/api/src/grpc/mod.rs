//! gRPC transport.
//!
//! Each service process exposes one tonic service next to its HTTP router.
//! Both transports share the service layer, so validation, role checks and
//! event publishing behave identically; only the error rendering differs
//! (see `impl From<AppError> for tonic::Status`).

pub mod auth;
pub mod booking;
pub mod client;
pub mod room;

pub use auth::AuthInterceptor;
pub use booking::BookingGrpc;
pub use client::ClientGrpc;
pub use room::RoomGrpc;

use roomdesk_core::listing::ListRequest;
use roomdesk_core::types::Timestamp;
use roomdesk_proto::v1::ListOptions;
use tonic::Status;

/// Convert a stored timestamp to its protobuf form.
pub(crate) fn to_proto_timestamp(ts: &Timestamp) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: ts.timestamp(),
        nanos: ts.timestamp_subsec_nanos() as i32,
    }
}

/// Convert a required protobuf timestamp, naming `field` on failure.
pub(crate) fn from_proto_timestamp(
    field: &str,
    ts: Option<prost_types::Timestamp>,
) -> Result<Timestamp, Status> {
    let ts = ts.ok_or_else(|| Status::invalid_argument(format!("{field} is required")))?;
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| Status::invalid_argument(format!("{field} has negative nanos")))?;
    chrono::DateTime::from_timestamp(ts.seconds, nanos)
        .ok_or_else(|| Status::invalid_argument(format!("{field} is out of range")))
}

/// Translate wire list options into the shared list request.
///
/// A zero `limit` selects the default page size.
pub(crate) fn list_request(options: Option<ListOptions>) -> ListRequest {
    let options = options.unwrap_or_default();
    ListRequest {
        offset: Some(options.offset),
        limit: (options.limit != 0).then_some(options.limit),
        sort_by: non_empty(options.sort_by),
        sort_order: non_empty(options.sort_order),
        filters: options
            .filters
            .into_iter()
            .map(|f| (f.field, f.value))
            .collect(),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
