//! State management module
//!
//! This module contains the timer state machine, its render projection and
//! the shared session that schedules ticks.

pub mod mode;
pub mod timer_state;
pub mod view;
pub mod event;
pub mod app_state;

// Re-export main types
pub use mode::Mode;
pub use timer_state::{format_time, Phase, TickOutcome, TimerState};
pub use view::{ModeButton, TimerView};
pub use event::TimerEvent;
pub use app_state::AppState;
