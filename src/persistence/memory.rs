use super::{PersistenceError, PersistenceResult, TaskStore};
use crate::task::{NewTask, TaskRecord, TaskUpdate};
use parking_lot::RwLock;

#[derive(Default)]
struct TaskTable {
    next_id: i64,
    tasks: Vec<TaskRecord>,
}

/// Process-local task store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryTaskStore {
    table: RwLock<TaskTable>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<TaskRecord>) -> PersistenceResult<Self> {
        super::validate_tasks(&tasks)?;
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Ok(Self {
            table: RwLock::new(TaskTable { next_id, tasks }),
        })
    }
}

impl TaskStore for MemoryTaskStore {
    fn list(&self) -> PersistenceResult<Vec<TaskRecord>> {
        Ok(self.table.read().tasks.clone())
    }

    fn create(&self, task: NewTask) -> PersistenceResult<TaskRecord> {
        super::validate_new_task(&task)?;
        let mut table = self.table.write();
        table.next_id += 1;
        let record = task.with_id(table.next_id);
        table.tasks.push(record.clone());
        Ok(record)
    }

    fn update(&self, update: TaskUpdate) -> PersistenceResult<TaskRecord> {
        super::validate_task_update(&update)?;
        let mut table = self.table.write();
        let id = update.id;
        let task = table
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PersistenceError::NotFound(format!("task {id}")))?;
        update.apply_to(task);
        Ok(task.clone())
    }

    fn delete(&self, id: i64) -> PersistenceResult<TaskRecord> {
        let mut table = self.table.write();
        let idx = table
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PersistenceError::NotFound(format!("task {id}")))?;
        Ok(table.tasks.remove(idx))
    }
}
