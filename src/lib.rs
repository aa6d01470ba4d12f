//! Study Tool - A study-productivity HTTP service
//!
//! This library provides a pomodoro countdown timer, a task list and a
//! flash-card deck. The list and deck are persisted to a key-value store and
//! every widget event is reported through a notification sink.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
