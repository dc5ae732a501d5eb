//! Custom hooks shared by the pages.

pub mod use_refresh;

pub use use_refresh::*;
