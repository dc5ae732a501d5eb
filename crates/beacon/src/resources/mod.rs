//! One module per backend resource.
//!
//! Each function performs exactly one call through an [`ApiClient`] against a
//! fixed path and hands back whatever the client resolves to. Validation,
//! retries and error display are the client's business, not theirs.
//!
//! [`ApiClient`]: crate::api::ApiClient

pub mod bindings;
pub mod channels;
pub mod contents;
pub mod jobs;
pub mod logs;
pub mod sources;
pub mod system;

pub use bindings::*;
pub use channels::*;
pub use contents::*;
pub use jobs::*;
pub use logs::*;
pub use sources::*;
pub use system::*;
