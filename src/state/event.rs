//! Events emitted by the timer session

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Mode;

/// Notification broadcast to listeners outside the state machine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TimerEvent {
    /// Remaining time reached zero; the session is now idle in `next`
    Expired {
        finished: Mode,
        next: Mode,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    pub fn expired(finished: Mode, next: Mode) -> Self {
        TimerEvent::Expired { finished, next, at: Utc::now() }
    }
}
