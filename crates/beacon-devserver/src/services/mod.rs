//! Outbound services used by the handlers.

pub mod upstream;

pub use upstream::*;
