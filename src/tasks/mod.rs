//! Background tasks module
//!
//! This module contains the countdown ticker and the alarm listener that run
//! alongside the HTTP server.

pub mod ticker;
pub mod alarm;

// Re-export main functions
pub use ticker::{ticker_task, TICK_PERIOD};
pub use alarm::alarm_task;
