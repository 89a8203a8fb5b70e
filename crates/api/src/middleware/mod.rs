//! Authentication and authorization extractors.
//!
//! - [`auth::Principal`] -- The authenticated caller, decoded from a JWT Bearer token.
//! - [`rbac::RequireClient`] -- Requires the `client` or `admin` role.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
pub mod rbac;
