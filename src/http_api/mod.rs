use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use crate::persistence::{MemoryTaskStore, PersistenceError, TaskStore};
use crate::task::{NewTask, TaskId, TaskRecord, TaskUpdate};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new<S: TaskStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn with_shared(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    fn store(&self) -> Arc<dyn TaskStore> {
        self.store.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MemoryTaskStore::new())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::InvalidData(message) => ApiError::Invalid(message),
            PersistenceError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            other => {
                log::error!("task store failure: {other}");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/tasks",
            get(list_tasks)
                .post(create_task)
                .put(update_task)
                .delete(delete_task),
        )
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("task API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskRecord>>, ApiError> {
    let tasks = state.store().list()?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskRecord>), ApiError> {
    let Json(task) = payload?;
    let created = state.store().create(task)?;
    log::info!("created task {} ('{}')", created.id, created.title);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskUpdate>, JsonRejection>,
) -> Result<Json<TaskRecord>, ApiError> {
    let Json(update) = payload?;
    let updated = state.store().update(update)?;
    log::info!("updated task {}", updated.id);
    Ok(Json(updated))
}

async fn delete_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskId>, JsonRejection>,
) -> Result<Json<TaskRecord>, ApiError> {
    let Json(TaskId { id }) = payload?;
    let removed = state.store().delete(id)?;
    log::info!("deleted task {id}");
    Ok(Json(removed))
}
