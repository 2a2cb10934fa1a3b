use crate::calendar::Day;
use serde::{Deserialize, Serialize};

/// A task exposed through the task resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    pub date: Day,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for creating a task; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    pub date: Day,
    #[serde(default)]
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>, date: Day) -> Self {
        Self {
            title: title.into(),
            description: None,
            assigned_to: None,
            sprint: None,
            date,
            completed: false,
        }
    }

    pub fn with_id(self, id: i64) -> TaskRecord {
        TaskRecord {
            id,
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            sprint: self.sprint,
            date: self.date,
            completed: self.completed,
        }
    }
}

/// Partial update keyed by id. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn apply_to(self, task: &mut TaskRecord) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = Some(assigned_to);
        }
        if let Some(sprint) = self.sprint {
            task.sprint = Some(sprint);
        }
        if let Some(date) = self.date {
            task.date = date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Request body for deleting a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskId {
    pub id: i64,
}
