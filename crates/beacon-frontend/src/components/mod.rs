//! Reusable UI components for the Beacon frontend.

pub mod loading_bar;
pub mod nav_bar;
pub mod pager;

pub use loading_bar::*;
pub use nav_bar::*;
pub use pager::*;
