//! Alarm task tests against a stub audio player
#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::time::sleep;

use pomodoro::{
    services::AlarmConfig,
    state::{AppState, Mode, Phase, TimerState},
    tasks::alarm_task,
};

/// Write a player script that logs each call and always fails
fn failing_player(name: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("pomodoro-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let log = dir.join("plays.log");
    let player = dir.join("player.sh");
    fs::write(
        &player,
        format!("#!/bin/sh\necho \"$1\" >> '{}'\nexit 1\n", log.display()),
    )
    .unwrap();
    fs::set_permissions(&player, fs::Permissions::from_mode(0o755)).unwrap();

    (player, log)
}

fn plays(log: &Path) -> usize {
    fs::read_to_string(log).map(|s| s.lines().count()).unwrap_or(0)
}

async fn spawn_alarm(state: &Arc<AppState>, config: AlarmConfig) {
    tokio::spawn(alarm_task(Arc::clone(state), config));
    while state.event_tx.receiver_count() == 0 {
        tokio::task::yield_now().await;
    }
}

/// Run a short break down to zero by hand
fn expire_short_break(state: &Arc<AppState>) {
    state.select_mode(Mode::ShortBreak).unwrap();
    state.start_or_pause().unwrap();
    for _ in 0..Mode::ShortBreak.duration_seconds() {
        state.apply_tick(0).unwrap();
    }
}

#[tokio::test]
async fn plays_once_per_expiry_and_survives_player_failure() {
    let (player, log) = failing_player("plays");
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    spawn_alarm(&state, AlarmConfig::new(player.to_string_lossy(), "alarm-ring.mp3")).await;

    expire_short_break(&state);
    assert_eq!(state.get_timer_state().unwrap(), TimerState::new());

    for _ in 0..50 {
        if plays(&log) > 0 {
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }
    sleep(Duration::from_millis(300)).await;
    assert_eq!(plays(&log), 1);
    assert_eq!(fs::read_to_string(&log).unwrap().trim(), "alarm-ring.mp3");

    // A failed playback leaves the session usable
    let running = state.start_or_pause().unwrap();
    assert_eq!(running.phase(), Phase::Running);
    assert_eq!(running.mode, Mode::Focus);
    state.shutdown().unwrap();
}

#[tokio::test]
async fn muted_alarm_never_plays() {
    let (player, log) = failing_player("muted");
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string()));
    let config = AlarmConfig::new(player.to_string_lossy(), "alarm-ring.mp3").muted(true);
    spawn_alarm(&state, config).await;

    expire_short_break(&state);
    sleep(Duration::from_millis(500)).await;

    assert_eq!(plays(&log), 0);
    assert_eq!(state.get_timer_state().unwrap().mode, Mode::Focus);
}
