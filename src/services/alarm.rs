//! Alarm sound playback through an external audio player

use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// How the alarm is played
#[derive(Debug, Clone)]
pub struct AlarmConfig {
    /// Audio player executable, invoked as `<player> <sound>`
    pub player: String,
    /// Sound file handed to the player
    pub sound: PathBuf,
    /// Skip playback entirely
    pub muted: bool,
}

impl AlarmConfig {
    pub fn new(player: impl Into<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound: sound.into(),
            muted: false,
        }
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

/// Play the alarm sound once and wait for the player to exit
pub async fn play_alarm(config: &AlarmConfig) -> Result<(), String> {
    debug!("Playing {} with {}", config.sound.display(), config.player);

    let output = Command::new(&config.player)
        .arg(&config.sound)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", config.player, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", config.player, stderr.trim()));
    }

    info!("Alarm played");
    Ok(())
}

/// Check that the player can be executed and the sound file exists
pub async fn check_player_available(config: &AlarmConfig) -> Result<(), String> {
    Command::new(&config.player)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("{} is not available, alarms will be silent", config.player))?;

    if !tokio::fs::try_exists(&config.sound).await.unwrap_or(false) {
        return Err(format!("Alarm sound {} not found", config.sound.display()));
    }

    info!("{} is available", config.player);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_player_is_an_error() {
        let config = AlarmConfig::new("definitely-not-an-audio-player", "alarm-ring.mp3");
        let err = play_alarm(&config).await.unwrap_err();
        assert!(err.contains("definitely-not-an-audio-player"));
        assert!(check_player_available(&config).await.is_err());
    }

    #[test]
    fn muted_builder() {
        let config = AlarmConfig::new("paplay", "alarm-ring.mp3").muted(true);
        assert!(config.muted);
        assert_eq!(config.sound, PathBuf::from("alarm-ring.mp3"));
    }
}
