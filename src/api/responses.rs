//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{TimerState, TimerView};

/// API response structure for timer action endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response; the status is the timer's phase
    pub fn new(message: String, state: &TimerState) -> Self {
        Self {
            status: state.phase().as_str().to_string(),
            message,
            timestamp: Utc::now(),
            timer: TimerView::from(state),
        }
    }
}

/// Status response with session information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
