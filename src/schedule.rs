use crate::calculations::assignment::{SprintPartition, TaskRotation};
use crate::calculations::progress::{self, SprintProgress};
use crate::calendar::{self, Day};
use crate::catalog::ProjectTemplate;
use crate::roster::{ManualTasks, Roster};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// Roster is empty or every name is blank.
    NoValidMembers,
    /// No day is left to schedule after resolving the selection.
    NoDaysAvailable,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoValidMembers => write!(f, "no valid team member"),
            GenerateError::NoDaysAvailable => write!(f, "no days to schedule"),
        }
    }
}

impl std::error::Error for GenerateError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub member: String,
    pub task: String,
    #[serde(default)]
    pub done: bool,
}

impl Assignment {
    pub fn new(member: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            task: task.into(),
            done: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: Day,
    pub sprint: String,
    pub assignments: Vec<Assignment>,
}

impl ScheduleRow {
    /// True when the row has assignments and all of them are done.
    pub fn is_complete(&self) -> bool {
        !self.assignments.is_empty() && self.assignments.iter().all(|a| a.done)
    }
}

/// A single editable field of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentField {
    Task(String),
    Done(bool),
    Member(String),
}

/// Rows ordered by day ascending; each row holds one assignment per roster
/// position, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ScheduleRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn row(&self, day_index: usize) -> Option<&ScheduleRow> {
        self.rows.get(day_index)
    }

    pub fn assignment(&self, day_index: usize, member_index: usize) -> Option<&Assignment> {
        self.rows
            .get(day_index)
            .and_then(|row| row.assignments.get(member_index))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ScheduleRow> {
        self.rows
    }

    /// Replaces one field of one assignment. Returns `false`, leaving the
    /// schedule untouched, when either index is out of range.
    pub fn set_assignment_field(
        &mut self,
        day_index: usize,
        member_index: usize,
        field: AssignmentField,
    ) -> bool {
        let Some(assignment) = self
            .rows
            .get_mut(day_index)
            .and_then(|row| row.assignments.get_mut(member_index))
        else {
            return false;
        };
        match field {
            AssignmentField::Task(task) => assignment.task = task,
            AssignmentField::Done(done) => assignment.done = done,
            AssignmentField::Member(member) => assignment.member = member,
        }
        true
    }

    pub fn toggle_done(&mut self, day_index: usize, member_index: usize) -> bool {
        match self.assignment(day_index, member_index) {
            Some(current) => {
                let flipped = !current.done;
                self.set_assignment_field(day_index, member_index, AssignmentField::Done(flipped))
            }
            None => false,
        }
    }

    pub fn sprint_progress(&self) -> Vec<SprintProgress> {
        progress::sprint_progress(self)
    }
}

/// Builds schedules from a day selection, a roster and a project template.
pub struct ScheduleGenerator<'a> {
    template: &'a ProjectTemplate,
    today: Day,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(template: &'a ProjectTemplate) -> Self {
        Self {
            template,
            today: Day::today(),
        }
    }

    /// Overrides the start of the fallback sequence used when no day is
    /// selected.
    pub fn with_today(mut self, today: Day) -> Self {
        self.today = today;
        self
    }

    pub fn generate(
        &self,
        selected: &[Day],
        roster: &Roster,
        manual: &ManualTasks,
    ) -> Result<Schedule, GenerateError> {
        if !roster.has_valid_member() {
            return Err(GenerateError::NoValidMembers);
        }

        let sprints = self.template.sprints();
        let days = calendar::effective_days(selected, sprints.len(), self.today);
        if days.is_empty() {
            return Err(GenerateError::NoDaysAvailable);
        }
        let partition = SprintPartition::new(days.len(), sprints.len())
            .ok_or(GenerateError::NoDaysAvailable)?;

        let manual_lists: Vec<Vec<String>> =
            (0..roster.len()).map(|idx| manual.parsed(idx)).collect();
        let rotation = TaskRotation::new(self.template, &manual_lists);

        let rows = days
            .iter()
            .enumerate()
            .map(|(day_index, day)| {
                let sprint = &sprints[partition.sprint_index(day_index)];
                let assignments = roster
                    .members()
                    .iter()
                    .enumerate()
                    .map(|(member_index, member)| {
                        Assignment::new(
                            member.clone(),
                            rotation.task_for(sprint, day_index, member_index),
                        )
                    })
                    .collect();
                ScheduleRow {
                    date: *day,
                    sprint: sprint.clone(),
                    assignments,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "generated {} day(s) for {} member(s) with project type '{}'",
            rows.len(),
            roster.len(),
            self.template.id()
        );
        Ok(Schedule { rows })
    }
}

/// Generates a schedule, falling back to today's date when `selected` is
/// empty.
pub fn generate(
    selected: &[Day],
    roster: &Roster,
    manual: &ManualTasks,
    template: &ProjectTemplate,
) -> Result<Schedule, GenerateError> {
    ScheduleGenerator::new(template).generate(selected, roster, manual)
}
