//! # client
//!
//! Typed client for the mock item API: HTTP seams, session and list state,
//! page logic, and the guarded router. Rendering is left to the embedder;
//! the `cli` crate is the reference front end.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;
