//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO carrying the full replacement row
//!
//! Entity structs implement [`Listable`](roomdesk_core::listing::Listable)
//! so that the SQL builder and the in-memory store share one field table.

pub mod booking;
pub mod client;
pub mod outbox;
pub mod room;
