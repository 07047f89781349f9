//! External service module
//!
//! This module contains the audio collaborator that rings the alarm.

pub mod alarm;

// Re-export main functions
pub use alarm::*;
