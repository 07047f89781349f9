//! Alarm playback background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    services::{play_alarm, AlarmConfig},
    state::{AppState, TimerEvent},
};

/// Background task that rings the alarm once for every expiry
pub async fn alarm_task(state: Arc<AppState>, config: AlarmConfig) {
    info!("Starting alarm task");

    let mut event_rx = state.subscribe_events();

    loop {
        match event_rx.recv().await {
            Ok(TimerEvent::Expired { finished, next, .. }) => {
                debug!("Alarm for {} expiry, next mode {}", finished, next);
                if config.muted {
                    debug!("Alarm muted, skipping playback");
                    continue;
                }

                // Playback is fire-and-forget
                let config = config.clone();
                tokio::spawn(async move {
                    if let Err(e) = play_alarm(&config).await {
                        warn!("Alarm playback failed: {}", e);
                    }
                });
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alarm task lagged behind, {} expiry events skipped", skipped);
            }
            Err(RecvError::Closed) => {
                error!("Timer event channel closed, stopping alarm task");
                break;
            }
        }
    }
}
