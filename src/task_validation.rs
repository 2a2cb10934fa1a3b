use crate::task::{NewTask, TaskRecord, TaskUpdate};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::new("task title is required"));
    }
    Ok(())
}

pub fn validate_new_task(task: &NewTask) -> Result<(), TaskValidationError> {
    validate_title(&task.title)
}

pub fn validate_update(update: &TaskUpdate) -> Result<(), TaskValidationError> {
    if let Some(title) = &update.title {
        validate_title(title).map_err(|_| {
            TaskValidationError::new(format!("task {} title cannot be blank", update.id))
        })?;
    }
    Ok(())
}

pub fn validate_task_collection(tasks: &[TaskRecord]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_title(&task.title).map_err(|_| {
            TaskValidationError::new(format!("task {} has an empty title", task.id))
        })?;
    }
    Ok(())
}
