//! Context providers for shared application state and services.

pub mod api;
pub mod loading;
pub mod notification;

pub use api::{ApiContext, ApiProvider, use_api};
pub use loading::use_global_loading;
pub use notification::{Notification, NotificationContext, NotificationProvider, use_notifications};
