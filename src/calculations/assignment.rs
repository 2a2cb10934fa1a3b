use crate::catalog::ProjectTemplate;

pub const GENERAL_TASK: &str = "Tarea general";

/// Splits an ordered day sequence into contiguous sprint blocks.
///
/// Every block holds `ceil(days / sprints)` days; the last sprint absorbs
/// whatever remains, and no day is ever mapped past the final sprint.
#[derive(Debug, Clone, Copy)]
pub struct SprintPartition {
    chunk_size: usize,
    sprint_count: usize,
}

impl SprintPartition {
    /// Returns `None` when there are no sprints to place days into.
    pub fn new(day_count: usize, sprint_count: usize) -> Option<Self> {
        if sprint_count == 0 {
            return None;
        }
        Some(Self {
            chunk_size: day_count.div_ceil(sprint_count).max(1),
            sprint_count,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn sprint_index(&self, day_index: usize) -> usize {
        (day_index / self.chunk_size).min(self.sprint_count - 1)
    }
}

/// Picks the task text for each (day, member) slot.
pub struct TaskRotation<'a> {
    template: &'a ProjectTemplate,
    manual: &'a [Vec<String>],
}

impl<'a> TaskRotation<'a> {
    /// `manual[i]` is the parsed manual list of roster position `i`.
    pub fn new(template: &'a ProjectTemplate, manual: &'a [Vec<String>]) -> Self {
        Self { template, manual }
    }

    pub fn task_for(&self, sprint: &str, day_index: usize, member_index: usize) -> String {
        if let Some(list) = self.manual.get(member_index).filter(|l| !l.is_empty()) {
            return list[day_index % list.len()].clone();
        }
        let pool = self.template.tasks_for(sprint);
        if !pool.is_empty() {
            return pool[(day_index + member_index) % pool.len()].clone();
        }
        GENERAL_TASK.to_string()
    }
}
