//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
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

use crate::{
    services::Notification,
    state::{AppState, FlashCard, PomodoroSnapshot, Task},
};
use super::responses::{
    CreateFlashCardRequest, CreateTaskRequest, DurationRequest, StatusResponse,
};

/// Log an internal failure and turn it into a 500
fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Map an optional lookup result onto 200 or 404
fn found<T>(result: Result<Option<T>, String>, context: &str, id: u64) -> Result<Json<T>, StatusCode> {
    match result {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => {
            warn!("{}: no item with id {}", context, id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => Err(internal_error(context, e)),
    }
}

/// Handle GET /status - Report that the service is up
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse::online())
}

/// Handle GET /pomodoro - Current timer snapshot
pub async fn pomodoro_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    state.pomodoro.snapshot()
        .map(Json)
        .map_err(|e| internal_error("Failed to read pomodoro state", e))
}

/// Handle POST /pomodoro/start
pub async fn pomodoro_start_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    info!("Pomodoro start requested");
    state.pomodoro.start()
        .map(Json)
        .map_err(|e| internal_error("Failed to start pomodoro", e))
}

/// Handle POST /pomodoro/pause
pub async fn pomodoro_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    info!("Pomodoro pause requested");
    state.pomodoro.pause()
        .map(Json)
        .map_err(|e| internal_error("Failed to pause pomodoro", e))
}

/// Handle POST /pomodoro/toggle - Start/pause button
pub async fn pomodoro_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    state.pomodoro.toggle()
        .map(Json)
        .map_err(|e| internal_error("Failed to toggle pomodoro", e))
}

/// Handle POST /pomodoro/reset
pub async fn pomodoro_reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    info!("Pomodoro reset requested");
    state.pomodoro.reset()
        .map(Json)
        .map_err(|e| internal_error("Failed to reset pomodoro", e))
}

/// Handle PUT /pomodoro/duration - Invalid input leaves the timer untouched
pub async fn pomodoro_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<PomodoroSnapshot>, StatusCode> {
    let result = match request.minutes() {
        Some(minutes) => state.pomodoro.set_duration_minutes(minutes),
        None => {
            debug!("Ignoring invalid duration input: {}", request.minutes);
            state.pomodoro.snapshot()
        }
    };
    result
        .map(Json)
        .map_err(|e| internal_error("Failed to set pomodoro duration", e))
}

/// Handle GET /tasks
pub async fn list_tasks_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, StatusCode> {
    state.list_tasks()
        .map(Json)
        .map_err(|e| internal_error("Failed to list tasks", e))
}

/// Handle POST /tasks - Create a task
pub async fn create_task_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    state.add_task(request.task)
        .map(|task| (StatusCode::CREATED, Json(task)))
        .map_err(|e| internal_error("Failed to create task", e))
}

/// Handle POST /tasks/:id/toggle - Flip completion
pub async fn toggle_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, StatusCode> {
    found(state.toggle_task(id), "Failed to toggle task", id)
}

/// Handle DELETE /tasks/:id
pub async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, StatusCode> {
    found(state.delete_task(id), "Failed to delete task", id)
}

/// Handle GET /flash-cards
pub async fn list_flash_cards_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FlashCard>>, StatusCode> {
    state.list_flash_cards()
        .map(Json)
        .map_err(|e| internal_error("Failed to list flash cards", e))
}

/// Handle POST /flash-cards - Create a card
pub async fn create_flash_card_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateFlashCardRequest>,
) -> Result<(StatusCode, Json<FlashCard>), StatusCode> {
    state.add_flash_card(request.question, request.answer)
        .map(|card| (StatusCode::CREATED, Json(card)))
        .map_err(|e| internal_error("Failed to create flash card", e))
}

/// Handle POST /flash-cards/:id/flip
pub async fn flip_flash_card_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<FlashCard>, StatusCode> {
    found(state.flip_flash_card(id), "Failed to flip flash card", id)
}

/// Handle DELETE /flash-cards/:id
pub async fn delete_flash_card_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<FlashCard>, StatusCode> {
    found(state.delete_flash_card(id), "Failed to delete flash card", id)
}

/// Handle GET /notifications - Recent notifications, oldest first
pub async fn notifications_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Notification>> {
    Json(state.notifier.recent())
}

/// Handle GET /notifications/stream - Live notifications as server-sent events
pub async fn notification_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Notification stream subscriber connected");
    let rx = state.notifier.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    match Event::default().event("notification").json_data(&notification) {
                        Ok(event) => return Some((Ok(event), rx)),
                        Err(e) => warn!("Failed to encode notification event: {}", e),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Notification stream lagged, skipped {} notifications", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
