//! Entity kinds and their messaging coordinates.

/// The persisted business records served by roomdesk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Booking,
    Client,
    Room,
}

impl EntityKind {
    /// Display name used in error messages (`"Booking with id 4 not found"`).
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Booking => "Booking",
            EntityKind::Client => "Client",
            EntityKind::Room => "Room",
        }
    }

    /// Lowercase key used as the routing-key prefix.
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Booking => "booking",
            EntityKind::Client => "client",
            EntityKind::Room => "room",
        }
    }

    /// Durable topic exchange that receives this entity's events.
    pub fn exchange(self) -> &'static str {
        match self {
            EntityKind::Booking => "booking_exchange",
            EntityKind::Client => "client_exchange",
            EntityKind::Room => "room_exchange",
        }
    }

    /// Routing key published after a successful create.
    pub fn created_routing_key(self) -> &'static str {
        match self {
            EntityKind::Booking => "booking.created",
            EntityKind::Client => "client.created",
            EntityKind::Room => "room.created",
        }
    }
}
