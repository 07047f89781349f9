//! Pomodoro - A state-managed countdown timer served over HTTP
//!
//! This library provides the focus/break timer state machine, the session
//! that ticks it once per second, and an HTTP surface to render and drive it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Mode, TimerState, TimerView};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
