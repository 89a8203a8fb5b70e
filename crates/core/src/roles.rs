//! Well-known role names and the parsed [`Role`] carried by a principal.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

/// Roles a client account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Client => ROLE_CLIENT,
        }
    }

    /// Parse a stored role name. Returns `None` for anything unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_CLIENT => Some(Role::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to read any entity and to create bookings.
pub const READ_ROLES: &[Role] = &[Role::Client, Role::Admin];

/// Roles allowed to mutate entities.
pub const WRITE_ROLES: &[Role] = &[Role::Admin];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("client"), Some(Role::Client));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
