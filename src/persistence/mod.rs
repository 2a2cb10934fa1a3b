use crate::project::Project;
use crate::task::{NewTask, TaskRecord, TaskUpdate};
use crate::task_validation;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound(what) => write!(f, "{what} not found"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Durable home for the saved project list and the last opened project.
pub trait ProjectStore {
    fn save_projects(&self, projects: &[Project]) -> PersistenceResult<()>;
    fn load_projects(&self) -> PersistenceResult<Vec<Project>>;
    fn save_last_opened(&self, id: Option<&str>) -> PersistenceResult<()>;
    fn load_last_opened(&self) -> PersistenceResult<Option<String>>;
}

/// Backing store for the task resource.
pub trait TaskStore: Send + Sync {
    fn list(&self) -> PersistenceResult<Vec<TaskRecord>>;
    fn create(&self, task: NewTask) -> PersistenceResult<TaskRecord>;
    fn update(&self, update: TaskUpdate) -> PersistenceResult<TaskRecord>;
    /// Removes the task and returns it.
    fn delete(&self, id: i64) -> PersistenceResult<TaskRecord>;
}

pub fn validate_new_task(task: &NewTask) -> PersistenceResult<()> {
    task_validation::validate_new_task(task)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn validate_task_update(update: &TaskUpdate) -> PersistenceResult<()> {
    task_validation::validate_update(update)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn validate_tasks(tasks: &[TaskRecord]) -> PersistenceResult<()> {
    task_validation::validate_task_collection(tasks)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn validate_projects(projects: &[Project]) -> PersistenceResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(projects.len());
    for project in projects {
        if project.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData(format!(
                "project '{}' has an empty id",
                project.name
            )));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate project id {}",
                project.id
            )));
        }
    }
    Ok(())
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonProjectStore, load_schedule_from_csv, save_schedule_to_csv};
pub use memory::MemoryTaskStore;
