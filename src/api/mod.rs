//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and request/response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/api/status", get(status_handler))
        // Pomodoro timer
        .route("/pomodoro", get(pomodoro_handler))
        .route("/pomodoro/start", post(pomodoro_start_handler))
        .route("/pomodoro/pause", post(pomodoro_pause_handler))
        .route("/pomodoro/toggle", post(pomodoro_toggle_handler))
        .route("/pomodoro/reset", post(pomodoro_reset_handler))
        .route("/pomodoro/duration", put(pomodoro_duration_handler))
        // Task list
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/:id/toggle", post(toggle_task_handler))
        .route("/tasks/:id", delete(delete_task_handler))
        // Flash cards
        .route("/flash-cards", get(list_flash_cards_handler).post(create_flash_card_handler))
        .route("/flash-cards/:id/flip", post(flip_flash_card_handler))
        .route("/flash-cards/:id", delete(delete_flash_card_handler))
        .route("/notifications", get(notifications_handler))
        .route("/notifications/stream", get(notification_stream_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
