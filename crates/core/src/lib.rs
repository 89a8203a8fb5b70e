//! Shared domain primitives for the roomdesk services.
//!
//! This crate has no I/O. It is used by the repository layer, the event
//! publisher, and both transports.

pub mod entity;
pub mod error;
pub mod listing;
pub mod roles;
pub mod types;
pub mod validation;
