//! Client entity model and DTOs.

use roomdesk_core::listing::{FieldKind, FieldSpec, FieldValue, Listable};
use roomdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full client row from the `clients` table.
///
/// The password hash is never serialized. `version` increments on every
/// successful update and drives optimistic concurrency.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub fname: String,
    pub sname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_role: String,
    pub activated: bool,
    pub version: i32,
    pub created_at: Timestamp,
}

/// Request body for creating a client. Carries the plaintext password,
/// which is hashed before it reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub fname: String,
    pub sname: String,
    pub email: String,
    pub password: String,
    pub user_role: Option<String>,
    pub activated: Option<bool>,
}

/// Insert DTO with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub fname: String,
    pub sname: String,
    pub email: String,
    pub password_hash: String,
    pub user_role: String,
    pub activated: bool,
}

/// Request body for a full-row client update.
///
/// `version` must equal the stored version or the update is rejected.
/// `password` is optional; when absent the stored hash is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClient {
    pub fname: String,
    pub sname: String,
    pub email: String,
    pub user_role: String,
    pub activated: bool,
    pub version: i32,
    pub password: Option<String>,
}

/// Repository-level update with the optional password already hashed.
#[derive(Debug, Clone)]
pub struct ClientChanges {
    pub fname: String,
    pub sname: String,
    pub email: String,
    pub user_role: String,
    pub activated: bool,
    pub expected_version: i32,
    pub password_hash: Option<String>,
}

pub const CLIENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Int),
    FieldSpec::new("fname", FieldKind::Text),
    FieldSpec::new("sname", FieldKind::Text),
    FieldSpec::new("email", FieldKind::Text),
    FieldSpec::new("user_role", FieldKind::Text),
    FieldSpec::new("activated", FieldKind::Bool),
];

impl Listable for Client {
    const FIELDS: &'static [FieldSpec] = CLIENT_FIELDS;

    fn id(&self) -> DbId {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Int(self.id)),
            "fname" => Some(FieldValue::Text(self.fname.clone())),
            "sname" => Some(FieldValue::Text(self.sname.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            "user_role" => Some(FieldValue::Text(self.user_role.clone())),
            "activated" => Some(FieldValue::Bool(self.activated)),
            _ => None,
        }
    }
}

impl Client {
    /// Build the freshly inserted row: version starts at 1.
    pub fn from_new(id: DbId, input: &NewClient, created_at: Timestamp) -> Self {
        Self {
            id,
            fname: input.fname.clone(),
            sname: input.sname.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            user_role: input.user_role.clone(),
            activated: input.activated,
            version: 1,
            created_at,
        }
    }

    /// Apply `changes` and bump the version.
    pub fn apply_changes(&mut self, changes: &ClientChanges) {
        self.fname = changes.fname.clone();
        self.sname = changes.sname.clone();
        self.email = changes.email.clone();
        self.user_role = changes.user_role.clone();
        self.activated = changes.activated;
        if let Some(hash) = &changes.password_hash {
            self.password_hash = hash.clone();
        }
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let client = Client {
            id: 1,
            fname: "Ada".into(),
            sname: "Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            user_role: "client".into(),
            activated: false,
            version: 1,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&client).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["version"], 1);
    }
}
