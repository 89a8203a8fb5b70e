//! Service layer: one service per entity, shared by the HTTP handlers and
//! the gRPC services.
//!
//! Services turn repository absence and version mismatches into domain
//! errors, validate client input, and hand each create's outbox row to the
//! [`OutboxDispatcher`](roomdesk_events::OutboxDispatcher) after commit.

pub mod booking;
pub mod client;
pub mod room;

pub use booking::BookingService;
pub use client::ClientService;
pub use room::RoomService;

use roomdesk_core::listing::{FieldSpec, ListQuery, ListRequest};

use crate::error::AppResult;

/// Validate a raw list request against an entity's field table.
fn parse_list(request: &ListRequest, fields: &'static [FieldSpec]) -> AppResult<ListQuery> {
    Ok(ListQuery::parse(request, fields)?)
}
