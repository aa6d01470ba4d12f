//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod pomodoro_ticker;

// Re-export main types
pub use pomodoro_ticker::{spawn_ticker, TickHandle, TickOutcome, TICK_PERIOD};
