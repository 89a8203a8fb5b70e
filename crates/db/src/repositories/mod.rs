//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod client_repo;
pub mod list;
pub mod outbox_repo;
pub mod room_repo;

pub use booking_repo::BookingRepo;
pub use client_repo::ClientRepo;
pub use outbox_repo::OutboxRepo;
pub use room_repo::RoomRepo;
