//! Countdown presets and their fixed durations

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// One of the three fixed countdown presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// All modes in display order
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Nominal duration of the mode in seconds
    pub const fn duration_seconds(self) -> u64 {
        match self {
            Mode::Focus => 1500,
            Mode::ShortBreak => 300,
            Mode::LongBreak => 900,
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Name used in URLs and JSON payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Mode selected automatically once this one runs out.
    /// Long break is never picked here.
    pub fn after_expiry(self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("Unknown mode: {}", s))
    }
}
