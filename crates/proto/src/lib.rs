//! Protocol buffer definitions for the roomdesk services.
//!
//! All types are generated by `tonic-build` from `proto/`. Each service
//! module exposes its message types plus `*_server` and `*_client` modules.

/// Version 1 of the roomdesk API: `BookingService`, `ClientService`,
/// `RoomService` and the shared `ListOptions`.
#[allow(missing_docs)]
pub mod v1 {
    tonic::include_proto!("roomdesk.v1");
}
