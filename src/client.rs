//! Typed client for the task resource served by [`crate::http_api`].
//!
//! Every failure, whether transport or a non-success status, surfaces as
//! [`ClientError::ResourceRequestFailed`]. Requests are never retried.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::task::{NewTask, TaskId, TaskRecord, TaskUpdate};

const TASKS_PATH: &str = "/api/tasks";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    ResourceRequestFailed {
        operation: &'static str,
        status: Option<u16>,
        message: String,
    },
}

impl ClientError {
    fn failed(operation: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::ResourceRequestFailed {
            operation,
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ResourceRequestFailed { status, .. } => *status,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::ResourceRequestFailed {
                operation,
                status: Some(status),
                message,
            } => write!(f, "{operation} failed with status {status}: {message}"),
            ClientError::ResourceRequestFailed {
                operation,
                status: None,
                message,
            } => write!(f, "{operation} failed: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug, Clone)]
pub struct TaskClient {
    http: Client,
    tasks_url: String,
}

impl TaskClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::failed("build client", None, e.to_string()))?;
        Ok(Self {
            http,
            tasks_url: format!("{}{TASKS_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, ClientError> {
        let request = self.http.request(Method::GET, &self.tasks_url);
        send("fetch tasks", request).await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<TaskRecord, ClientError> {
        let request = self.http.request(Method::POST, &self.tasks_url).json(task);
        send("create task", request).await
    }

    pub async fn update_task(&self, update: &TaskUpdate) -> Result<TaskRecord, ClientError> {
        let request = self.http.request(Method::PUT, &self.tasks_url).json(update);
        send("update task", request).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<TaskRecord, ClientError> {
        let request = self
            .http
            .request(Method::DELETE, &self.tasks_url)
            .json(&TaskId { id });
        send("delete task", request).await
    }
}

async fn send<T: DeserializeOwned>(
    operation: &'static str,
    request: RequestBuilder,
) -> Result<T, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|e| ClientError::failed(operation, None, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::warn!("{operation} returned {status}");
        return Err(ClientError::failed(operation, Some(status.as_u16()), body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::failed(operation, Some(status.as_u16()), e.to_string()))
}
