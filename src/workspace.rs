use crate::calendar::{self, Day};
use crate::catalog::{Catalog, DEFAULT_PROJECT_TYPE, ProjectTemplate};
use crate::persistence::{PersistenceResult, ProjectStore};
use crate::project::{Project, ProjectDraft};
use crate::schedule::{AssignmentField, GenerateError, ScheduleGenerator};
use std::collections::HashSet;
use std::fmt;

const UNNAMED_PROJECT: &str = "Sin nombre";
const COPY_SUFFIX: &str = " (copia)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    MissingProjectName,
    ProjectNotFound(String),
    UnknownProjectType(String),
    Generate(GenerateError),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::MissingProjectName => {
                write!(f, "the project needs a name before it can be saved")
            }
            WorkspaceError::ProjectNotFound(id) => write!(f, "project {id} not found"),
            WorkspaceError::UnknownProjectType(id) => write!(f, "unknown project type '{id}'"),
            WorkspaceError::Generate(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<GenerateError> for WorkspaceError {
    fn from(value: GenerateError) -> Self {
        Self::Generate(value)
    }
}

/// Everything the dashboard works with: the saved projects, the project
/// currently open in the editor and the selected project type.
pub struct Workspace {
    catalog: Catalog,
    projects: Vec<Project>,
    current_project_id: Option<String>,
    draft: ProjectDraft,
    template_index: usize,
    editing: bool,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Workspace {
    pub fn new(catalog: Catalog) -> Self {
        let draft = ProjectDraft::default();
        let template_index = catalog.position(&draft.project_type).unwrap_or(0);
        Self {
            catalog,
            projects: Vec::new(),
            current_project_id: None,
            draft,
            template_index,
            editing: false,
        }
    }

    /// Loads saved projects and reopens the last opened one, or the first
    /// one when nothing was recorded.
    pub fn restore<S: ProjectStore + ?Sized>(
        catalog: Catalog,
        store: &S,
    ) -> PersistenceResult<Self> {
        let mut workspace = Self::new(catalog);
        workspace.projects = store.load_projects()?;
        let last_opened = store.load_last_opened()?;
        let to_open = last_opened
            .filter(|id| workspace.projects.iter().any(|p| &p.id == id))
            .or_else(|| workspace.projects.first().map(|p| p.id.clone()));
        if let Some(id) = to_open {
            if let Err(err) = workspace.load_project(&id) {
                log::warn!("could not reopen project {id}: {err}");
            }
        }
        log::info!("restored {} saved project(s)", workspace.projects.len());
        Ok(workspace)
    }

    /// Writes the project list and the current-project pointer.
    pub fn persist<S: ProjectStore + ?Sized>(&self, store: &S) -> PersistenceResult<()> {
        store.save_projects(&self.projects)?;
        store.save_last_opened(self.current_project_id.as_deref())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn template_index(&self) -> usize {
        self.template_index
    }

    pub fn selected_template(&self) -> Option<&ProjectTemplate> {
        self.catalog.get(self.template_index)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Flips schedule edit mode. Task and member text can only be changed
    /// while it is on; done flags stay toggleable either way.
    pub fn toggle_editing(&mut self) -> bool {
        self.editing = !self.editing;
        self.editing
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn select_project_type(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let index = self
            .catalog
            .position(id)
            .ok_or_else(|| WorkspaceError::UnknownProjectType(id.to_string()))?;
        self.select_template_index(index);
        Ok(())
    }

    pub fn next_project_type(&mut self) {
        let index = self.catalog.next_index(self.template_index);
        self.select_template_index(index);
    }

    pub fn prev_project_type(&mut self) {
        let index = self.catalog.prev_index(self.template_index);
        self.select_template_index(index);
    }

    fn select_template_index(&mut self, index: usize) {
        if let Some(template) = self.catalog.get(index) {
            self.template_index = index;
            self.draft.project_type = template.id().to_string();
        }
    }

    pub fn toggle_day(&mut self, day: Day) {
        calendar::toggle_day(&mut self.draft.selected_days, day);
    }

    pub fn select_days<I: IntoIterator<Item = Day>>(&mut self, days: I) {
        let mut seen: HashSet<Day> = self.draft.selected_days.iter().copied().collect();
        for day in days {
            if seen.insert(day) {
                self.draft.selected_days.push(day);
            }
        }
    }

    pub fn clear_days(&mut self) {
        self.draft.selected_days.clear();
    }

    pub fn add_member(&mut self, name: impl Into<String>) -> usize {
        self.draft.team_members.add(name)
    }

    pub fn set_member(&mut self, index: usize, name: impl Into<String>) -> bool {
        self.draft.team_members.set(index, name)
    }

    /// Removes a roster slot; manual tasks of later members move down with
    /// them.
    pub fn remove_member(&mut self, index: usize) -> Option<String> {
        let removed = self.draft.team_members.remove(index)?;
        self.draft.manual_tasks.remove_position(index);
        Some(removed)
    }

    pub fn set_manual_tasks(&mut self, index: usize, text: impl Into<String>) {
        self.draft.manual_tasks.set(index, text);
    }

    /// Regenerates the draft schedule from today's date onward when no day
    /// is selected.
    pub fn generate(&mut self) -> Result<(), WorkspaceError> {
        self.generate_from(Day::today())
    }

    /// Regenerates the draft schedule. On failure nothing changes. When a
    /// saved project is open its record is updated as well.
    pub fn generate_from(&mut self, today: Day) -> Result<(), WorkspaceError> {
        let template = self
            .catalog
            .get(self.template_index)
            .ok_or_else(|| WorkspaceError::UnknownProjectType(self.draft.project_type.clone()))?;
        let schedule = ScheduleGenerator::new(template).with_today(today).generate(
            &self.draft.selected_days,
            &self.draft.team_members,
            &self.draft.manual_tasks,
        )?;
        self.draft.schedule = schedule;

        if let Some(id) = self.current_project_id.clone() {
            let mut record = Project::from_draft(id.clone(), &self.draft);
            if record.name.is_empty() {
                record.name = UNNAMED_PROJECT.to_string();
            }
            if let Some(slot) = self.projects.iter_mut().find(|p| p.id == id) {
                *slot = record;
            }
        }
        Ok(())
    }

    /// Edits one cell of the draft schedule. Text edits are refused outside
    /// edit mode.
    pub fn set_assignment_field(
        &mut self,
        day_index: usize,
        member_index: usize,
        field: AssignmentField,
    ) -> bool {
        let is_text = matches!(field, AssignmentField::Task(_) | AssignmentField::Member(_));
        if is_text && !self.editing {
            return false;
        }
        self.draft
            .schedule
            .set_assignment_field(day_index, member_index, field)
    }

    pub fn toggle_done(&mut self, day_index: usize, member_index: usize) -> bool {
        self.draft.schedule.toggle_done(day_index, member_index)
    }

    /// Saves the draft, creating a project on first save. Returns its id.
    pub fn save_current(&mut self) -> Result<String, WorkspaceError> {
        if self.draft.name.trim().is_empty() {
            return Err(WorkspaceError::MissingProjectName);
        }
        let id = match &self.current_project_id {
            Some(id) => id.clone(),
            None => self.new_project_id(),
        };
        let record = Project::from_draft(id.clone(), &self.draft);
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(slot) => *slot = record,
            None => self.projects.push(record),
        }
        self.current_project_id = Some(id.clone());
        log::info!("saved project {id} ('{}')", self.draft.name);
        Ok(id)
    }

    /// Copies the draft into the open project's record, if any. A blank
    /// name keeps the stored one. Returns whether a record was updated.
    pub fn sync_current(&mut self) -> bool {
        let Some(id) = self.current_project_id.as_deref() else {
            return false;
        };
        let Some(slot) = self.projects.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let mut record = Project::from_draft(id, &self.draft);
        if record.name.is_empty() {
            record.name = std::mem::take(&mut slot.name);
        }
        *slot = record;
        true
    }

    pub fn load_project(&mut self, id: &str) -> Result<(), WorkspaceError> {
        let project = self
            .project(id)
            .ok_or_else(|| WorkspaceError::ProjectNotFound(id.to_string()))?;
        let mut draft = ProjectDraft::from(project);
        let project_id = project.id.clone();
        self.template_index = match self.catalog.position(&draft.project_type) {
            Some(index) => index,
            None => {
                log::warn!(
                    "project {project_id} uses unknown project type '{}', using '{DEFAULT_PROJECT_TYPE}'",
                    draft.project_type
                );
                draft.project_type = DEFAULT_PROJECT_TYPE.to_string();
                self.catalog.position(DEFAULT_PROJECT_TYPE).unwrap_or(0)
            }
        };
        self.draft = draft;
        self.current_project_id = Some(project_id);
        Ok(())
    }

    /// Copies a saved project under a fresh id. Returns the new id.
    pub fn duplicate_project(&mut self, id: &str) -> Result<String, WorkspaceError> {
        let mut copy = self
            .project(id)
            .cloned()
            .ok_or_else(|| WorkspaceError::ProjectNotFound(id.to_string()))?;
        copy.id = self.new_project_id();
        copy.name.push_str(COPY_SUFFIX);
        let new_id = copy.id.clone();
        self.projects.push(copy);
        Ok(new_id)
    }

    /// Removes a saved project; the editor is cleared when it was open.
    pub fn delete_project(&mut self, id: &str) -> Result<Project, WorkspaceError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| WorkspaceError::ProjectNotFound(id.to_string()))?;
        let removed = self.projects.remove(index);
        if self.current_project_id.as_deref() == Some(id) {
            self.clear();
        }
        Ok(removed)
    }

    /// Resets the editor to a blank, unsaved project.
    pub fn clear(&mut self) {
        self.draft = ProjectDraft::default();
        self.current_project_id = None;
        if let Some(index) = self.catalog.position(&self.draft.project_type) {
            self.template_index = index;
        }
    }

    fn new_project_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self
            .projects
            .iter()
            .any(|p| p.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }
}
