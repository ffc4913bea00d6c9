//! Network layer: wire types and the HTTP API client.

pub mod api;
pub mod types;
