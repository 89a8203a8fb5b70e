//! Booking entity model and DTOs.

use roomdesk_core::listing::{FieldKind, FieldSpec, FieldValue, Listable};
use roomdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    pub room_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Free text, e.g. `"confirmed"`. No value set is enforced.
    pub status: String,
}

/// DTO for creating a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub client_id: DbId,
    pub room_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
}

/// DTO for a full-row booking update. Every column is replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBooking {
    pub client_id: DbId,
    pub room_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
}

pub const BOOKING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Int),
    FieldSpec::new("client_id", FieldKind::Int),
    FieldSpec::new("room_id", FieldKind::Int),
    FieldSpec::new("start_date", FieldKind::Timestamp),
    FieldSpec::new("end_date", FieldKind::Timestamp),
    FieldSpec::new("status", FieldKind::Text),
];

impl Listable for Booking {
    const FIELDS: &'static [FieldSpec] = BOOKING_FIELDS;

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Int(self.id)),
            "client_id" => Some(FieldValue::Int(self.client_id)),
            "room_id" => Some(FieldValue::Int(self.room_id)),
            "start_date" => Some(FieldValue::Timestamp(self.start_date)),
            "end_date" => Some(FieldValue::Timestamp(self.end_date)),
            "status" => Some(FieldValue::Text(self.status.clone())),
            _ => None,
        }
    }
}

impl Booking {
    /// Build the row an insert of `input` produces once `id` is assigned.
    pub fn from_create(id: DbId, input: &CreateBooking) -> Self {
        Self {
            id,
            client_id: input.client_id,
            room_id: input.room_id,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status.clone(),
        }
    }

    /// Replace every mutable column with the values in `input`.
    pub fn apply_update(&mut self, input: &UpdateBooking) {
        self.client_id = input.client_id;
        self.room_id = input.room_id;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.status = input.status.clone();
    }
}
