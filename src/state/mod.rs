//! State management module
//!
//! This module contains the widget states and the shared application state.

pub mod app_state;
pub mod flash_cards;
pub mod pomodoro;
pub mod task_list;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use flash_cards::{FlashCard, FlashDeck};
pub use pomodoro::{Pomodoro, PomodoroSnapshot};
pub use task_list::{Task, TaskList};
pub use timer_state::{parse_minutes, TimerEvent, TimerPhase, TimerState};
