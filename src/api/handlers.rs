//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, Mode, TimerEvent, TimerView};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start-pause - Start or pause the countdown
pub async fn start_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start_or_pause() {
        Ok(timer) => {
            let message = if timer.is_running() { "Timer started" } else { "Timer paused" };
            info!("Start-pause endpoint called - {}", message.to_lowercase());
            Ok(Json(ApiResponse::new(message.to_string(), &timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /give-up - Stop and rewind the current mode
pub async fn give_up_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.give_up() {
        Ok(timer) => {
            info!("Give-up endpoint called - timer reset");
            Ok(Json(ApiResponse::new(
                format!("{} timer reset", timer.mode.label()),
                &timer,
            )))
        }
        Err(e) => {
            error!("Failed to give up: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /mode/:mode - Switch to another mode
pub async fn select_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<Mode>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.select_mode(mode) {
        Ok((timer, true)) => {
            info!("Mode endpoint called - switched to {}", mode);
            Ok(Json(ApiResponse::new(
                format!("Switched to {}", mode.label()),
                &timer,
            )))
        }
        Ok((timer, false)) => Ok(Json(ApiResponse::new(
            format!("{} session already active", mode.label()),
            &timer,
        ))),
        Err(e) => {
            error!("Failed to select mode {}: {}", mode, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: TimerView::from(&timer),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream timer views and expiry events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("Event stream client connected");

    // The current view goes out first, then one per change
    let updates = stream::unfold((state.subscribe_updates(), true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let view = TimerView::from(&*rx.borrow_and_update());
        Some((Event::default().event("timer").json_data(&view), (rx, false)))
    });

    let expiries = stream::unfold(state.subscribe_events(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event @ TimerEvent::Expired { .. }) => {
                    return Some((Event::default().event("expired").json_data(&event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, {} expiry events skipped", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream::select(updates, expiries)).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
