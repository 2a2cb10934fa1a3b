pub mod calculations;
pub mod calendar;
pub mod catalog;
#[cfg(feature = "http_client")]
pub mod client;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod project;
pub mod roster;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;
pub mod workspace;

pub use calculations::{GENERAL_TASK, SprintProgress, progress_for, sprint_progress};
pub use calendar::{Day, DayParseError};
pub use catalog::{Catalog, DEFAULT_PROJECT_TYPE, ProjectTemplate, TemplateError};
#[cfg(feature = "http_client")]
pub use client::{ClientError, TaskClient};
pub use config::{AppConfig, ConfigError, StoreKind};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::{SqliteProjectStore, SqliteTaskStore};
pub use persistence::{
    JsonProjectStore, MemoryTaskStore, PersistenceError, PersistenceResult, ProjectStore,
    TaskStore, load_schedule_from_csv, save_schedule_to_csv, validate_projects,
};
pub use project::{Project, ProjectDraft};
pub use roster::{ManualTasks, Roster, parse_manual_tasks};
pub use schedule::{
    Assignment, AssignmentField, GenerateError, Schedule, ScheduleGenerator, ScheduleRow,
    generate,
};
pub use task::{NewTask, TaskId, TaskRecord, TaskUpdate};
pub use workspace::{Workspace, WorkspaceError};
