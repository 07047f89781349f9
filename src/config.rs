//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::services::AlarmConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A Pomodoro countdown timer served over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Audio player used to ring the alarm
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Alarm sound file
    #[arg(long, default_value = "alarm-ring.mp3")]
    pub sound: PathBuf,

    /// Do not play the alarm on expiry
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Alarm playback settings
    pub fn alarm(&self) -> AlarmConfig {
        AlarmConfig::new(self.player.clone(), self.sound.clone()).muted(self.mute)
    }
}
