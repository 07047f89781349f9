//! HTTP API module
//!
//! This module is the render surface: it exposes the timer view and forwards
//! user intents to the session.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start-pause", post(start_pause_handler))
        .route("/give-up", post(give_up_handler))
        .route("/mode/:mode", post(select_mode_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
