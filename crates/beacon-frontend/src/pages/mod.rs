//! Page components for different routes in the application.

pub mod contents;
pub mod dashboard;
pub mod history;
pub mod settings;

pub use contents::*;
pub use dashboard::*;
pub use history::*;
pub use settings::*;
