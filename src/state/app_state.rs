//! Session state shared between the HTTP surface and background tasks

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::tasks::ticker_task;
use super::{Mode, TickOutcome, TimerEvent, TimerState};

/// Handle to the running tick task
#[derive(Debug)]
struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

/// Timer state together with the ticker driving it.
/// Both live behind one lock so that a transition and the ticker
/// cancellation it implies are a single step.
#[derive(Debug)]
struct Session {
    timer: TimerState,
    ticker: Option<Ticker>,
    next_epoch: u64,
}

impl Session {
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!("Cancelling ticker {}", ticker.epoch);
            ticker.handle.abort();
        }
    }
}

/// Main application state owning the single timer session
#[derive(Debug)]
pub struct AppState {
    session: Mutex<Session>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for expiry notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with an idle focus timer
    pub fn new(port: u16, host: String) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            session: Mutex::new(Session {
                timer: TimerState::new(),
                ticker: None,
                next_epoch: 0,
            }),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session.lock()
            .map_err(|e| format!("Failed to lock timer session: {}", e))
    }

    /// Apply a transition, reconcile the ticker and notify watchers
    fn transition<F, R>(self: &Arc<Self>, action: &str, apply: F) -> Result<(TimerState, R), String>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut session = self.lock_session()?;

        let result = apply(&mut session.timer);
        if session.timer.is_running() {
            if session.ticker.is_none() {
                let epoch = session.next_epoch;
                session.next_epoch += 1;
                let handle = tokio::spawn(ticker_task(Arc::clone(self), epoch));
                debug!("Started ticker {}", epoch);
                session.ticker = Some(Ticker { epoch, handle });
            }
        } else {
            session.cancel_ticker();
        }

        // Published under the lock so snapshots arrive in order
        let new_state = session.timer.clone();
        self.publish(new_state.clone());
        drop(session);

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((new_state, result))
    }

    /// Start the countdown, or pause it if it is running
    pub fn start_or_pause(self: &Arc<Self>) -> Result<TimerState, String> {
        let (state, _) = self.transition("start-pause", TimerState::start_or_pause)?;
        info!("Timer {} in {} mode at {}", state.phase().as_str(), state.mode, state.display());
        Ok(state)
    }

    /// Stop the countdown and rewind the current mode
    pub fn give_up(self: &Arc<Self>) -> Result<TimerState, String> {
        let (state, _) = self.transition("give-up", TimerState::give_up)?;
        info!("Gave up, {} mode reset to {}", state.mode, state.display());
        Ok(state)
    }

    /// Switch mode; returns false when the request was a no-op
    pub fn select_mode(self: &Arc<Self>, mode: Mode) -> Result<(TimerState, bool), String> {
        let (state, changed) = self.transition("select-mode", |timer| timer.select_mode(mode))?;
        if changed {
            info!("Selected {} mode", mode);
        } else {
            debug!("Ignoring reselection of active {} mode", mode);
        }
        Ok((state, changed))
    }

    /// Apply a tick from the ticker identified by `epoch`.
    ///
    /// Ticks from a ticker that is no longer current are ignored.
    pub fn apply_tick(&self, epoch: u64) -> Result<TickOutcome, String> {
        let mut session = self.lock_session()?;

        if session.ticker.as_ref().map(|t| t.epoch) != Some(epoch) {
            debug!("Dropping stale tick from ticker {}", epoch);
            return Ok(TickOutcome::Ignored);
        }

        let outcome = session.timer.tick();
        if let TickOutcome::Expired { .. } = outcome {
            // The calling task exits on its own after expiry
            session.ticker = None;
        }

        if outcome != TickOutcome::Ignored {
            self.publish(session.timer.clone());
        }
        drop(session);

        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Counted { seconds_left } => {
                debug!("Tick: {} seconds left", seconds_left);
            }
            TickOutcome::Expired { finished, next } => {
                info!("{} timer expired, switching to {}", finished, next);
                if self.event_tx.send(TimerEvent::expired(finished, next)).is_err() {
                    debug!("No listeners for expiry notification");
                }
            }
        }

        Ok(outcome)
    }

    fn publish(&self, new_state: TimerState) {
        if let Err(e) = self.timer_update_tx.send(new_state) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_session().map(|session| session.timer.clone())
    }

    /// Whether a ticker is currently scheduled
    pub fn has_ticker(&self) -> Result<bool, String> {
        self.lock_session().map(|session| session.ticker.is_some())
    }

    /// Subscribe to expiry notifications
    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Subscribe to timer state snapshots
    pub fn subscribe_updates(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Cancel any pending tick
    pub fn shutdown(&self) -> Result<(), String> {
        let mut session = self.lock_session()?;
        session.cancel_ticker();
        info!("Timer session shut down");
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
