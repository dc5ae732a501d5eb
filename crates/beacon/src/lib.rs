//! The shared library for Beacon, the dashboard client for the content monitoring service.
//!
//! This library holds everything the frontend needs to talk to the backend:
//! the HTTP client wrapper, the global loading tracker, the per-resource API
//! functions, wire data structures, error handling, logging, and macros.

pub mod api;
pub mod config;
pub mod data;
pub mod errors;
pub mod id;
pub mod loading;
pub mod log;
pub mod macros;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;

pub use serde;
pub use serde_json;
pub use tracing;
