//! Once-per-second countdown task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::{AppState, TickOutcome};

/// Period between two countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that counts the session down while it is running.
///
/// Spawned by [`AppState`] when the timer starts running and aborted on
/// any exit from running. `epoch` identifies this ticker to the session.
pub async fn ticker_task(state: Arc<AppState>, epoch: u64) {
    debug!("Ticker {} running", epoch);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.apply_tick(epoch) {
            Ok(TickOutcome::Counted { .. }) => {}
            Ok(TickOutcome::Expired { .. }) => {
                debug!("Ticker {} finished on expiry", epoch);
                break;
            }
            Ok(TickOutcome::Ignored) => {
                debug!("Ticker {} superseded", epoch);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}
