//! Room entity model and DTOs.

use roomdesk_core::listing::{FieldKind, FieldSpec, FieldValue, Listable};
use roomdesk_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// DTO for creating a room. A new room is available unless stated otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// DTO for a full-row room update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub available: bool,
}

pub const ROOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Int),
    FieldSpec::new("name", FieldKind::Text),
    FieldSpec::new("description", FieldKind::Text),
    FieldSpec::new("available", FieldKind::Bool),
];

impl Listable for Room {
    const FIELDS: &'static [FieldSpec] = ROOM_FIELDS;

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "available" => Some(FieldValue::Bool(self.available)),
            _ => None,
        }
    }
}

impl Room {
    pub fn from_create(id: DbId, input: &CreateRoom) -> Self {
        Self {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            available: input.available,
        }
    }

    pub fn apply_update(&mut self, input: &UpdateRoom) {
        self.name = input.name.clone();
        self.description = input.description.clone();
        self.available = input.available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_room_defaults_to_available() {
        let input: CreateRoom = serde_json::from_str(r#"{"name":"Cedar"}"#).unwrap();
        assert!(input.available);
        assert_eq!(input.description, "");
    }

    #[test]
    fn update_room_requires_availability() {
        let result = serde_json::from_str::<UpdateRoom>(r#"{"name":"Cedar"}"#);
        assert!(result.is_err());
    }
}
