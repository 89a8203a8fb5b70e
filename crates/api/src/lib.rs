//! Roomdesk service library.
//!
//! Exposes the building blocks shared by the three service binaries
//! (config, state, services, HTTP routes, gRPC services, server bootstrap)
//! so integration tests can drive them without a network or a database.

pub mod auth;
pub mod config;
pub mod error;
pub mod grpc;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
