use crate::calendar::Day;
use crate::catalog::DEFAULT_PROJECT_TYPE;
use crate::roster::{ManualTasks, Roster};
use crate::schedule::Schedule;
use serde::{Deserialize, Serialize};

fn default_project_type() -> String {
    DEFAULT_PROJECT_TYPE.to_string()
}

/// A saved project as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default = "default_project_type")]
    pub project_type: String,
    #[serde(default)]
    pub selected_days: Vec<Day>,
    #[serde(default)]
    pub team_members: Roster,
    #[serde(rename = "manualTasksByIndex", default)]
    pub manual_tasks: ManualTasks,
    #[serde(default)]
    pub schedule: Schedule,
}

impl Project {
    pub fn from_draft(id: impl Into<String>, draft: &ProjectDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name.clone(),
            project_type: draft.project_type.clone(),
            selected_days: draft.selected_days.clone(),
            team_members: draft.team_members.clone(),
            manual_tasks: draft.manual_tasks.clone(),
            schedule: draft.schedule.clone(),
        }
    }
}

/// Editor state for the project being worked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub project_type: String,
    pub selected_days: Vec<Day>,
    pub team_members: Roster,
    pub manual_tasks: ManualTasks,
    pub schedule: Schedule,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            project_type: default_project_type(),
            selected_days: Vec::new(),
            team_members: Roster::with_blank_slot(),
            manual_tasks: ManualTasks::new(),
            schedule: Schedule::new(),
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        let project_type = if project.project_type.trim().is_empty() {
            default_project_type()
        } else {
            project.project_type.clone()
        };
        let team_members = if project.team_members.is_empty() {
            Roster::with_blank_slot()
        } else {
            project.team_members.clone()
        };
        Self {
            name: project.name.clone(),
            project_type,
            selected_days: project.selected_days.clone(),
            team_members,
            manual_tasks: project.manual_tasks.clone(),
            schedule: project.schedule.clone(),
        }
    }
}
