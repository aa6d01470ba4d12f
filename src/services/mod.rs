//! External collaborators
//!
//! This module contains the key-value store that persists widget data and
//! the notification sink that reports widget events.

pub mod notifier;
pub mod store;

// Re-export main types
pub use notifier::{Notification, NotificationLevel, NotificationOptions, Notifier};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
