use super::{PersistenceError, PersistenceResult, ProjectStore, TaskStore};
use crate::calendar::Day;
use crate::project::Project;
use crate::task::{NewTask, TaskRecord, TaskUpdate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const LAST_OPENED_KEY: &str = "last_opened_project_id";

fn lock(connection: &Mutex<Connection>) -> PersistenceResult<MutexGuard<'_, Connection>> {
    connection
        .lock()
        .map_err(|_| PersistenceError::InvalidData("sqlite connection mutex poisoned".into()))
}

pub struct SqliteProjectStore {
    connection: Mutex<Connection>,
}

impl SqliteProjectStore {
    pub fn new<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                project_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl ProjectStore for SqliteProjectStore {
    fn save_projects(&self, projects: &[Project]) -> PersistenceResult<()> {
        super::validate_projects(projects)?;
        let mut conn = lock(&self.connection)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM projects", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO projects (id, position, project_json) VALUES (?1, ?2, ?3)")?;
            for (position, project) in projects.iter().enumerate() {
                let json = serde_json::to_string(project)?;
                stmt.execute(params![project.id, position as i64, json])?;
            }
        }
        tx.commit()?;
        log::debug!("saved {} project(s) to sqlite", projects.len());
        Ok(())
    }

    fn load_projects(&self) -> PersistenceResult<Vec<Project>> {
        let conn = lock(&self.connection)?;
        let mut stmt = conn.prepare("SELECT project_json FROM projects ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut projects = Vec::new();
        for json in rows {
            let project: Project = serde_json::from_str(&json?)?;
            projects.push(project);
        }
        super::validate_projects(&projects)?;
        Ok(projects)
    }

    fn save_last_opened(&self, id: Option<&str>) -> PersistenceResult<()> {
        let conn = lock(&self.connection)?;
        match id {
            Some(id) => {
                conn.execute(
                    "INSERT INTO settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![LAST_OPENED_KEY, id],
                )?;
            }
            None => {
                conn.execute("DELETE FROM settings WHERE key = ?1", params![LAST_OPENED_KEY])?;
            }
        }
        Ok(())
    }

    fn load_last_opened(&self) -> PersistenceResult<Option<String>> {
        let conn = lock(&self.connection)?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![LAST_OPENED_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

pub struct SqliteTaskStore {
    connection: Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn new<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                assigned_to TEXT,
                sprint TEXT,
                date TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn find(conn: &Connection, id: i64) -> PersistenceResult<Option<TaskRecord>> {
        let raw = conn
            .query_row(
                "SELECT id, title, description, assigned_to, sprint, date, completed
                 FROM tasks WHERE id = ?1",
                params![id],
                RawTask::from_row,
            )
            .optional()?;
        raw.map(RawTask::into_record).transpose()
    }
}

struct RawTask {
    id: i64,
    title: String,
    description: Option<String>,
    assigned_to: Option<String>,
    sprint: Option<String>,
    date: String,
    completed: bool,
}

impl RawTask {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            assigned_to: row.get(3)?,
            sprint: row.get(4)?,
            date: row.get(5)?,
            completed: row.get(6)?,
        })
    }

    fn into_record(self) -> PersistenceResult<TaskRecord> {
        let date = Day::parse(&self.date).map_err(|err| {
            PersistenceError::InvalidData(format!("task {} has {err}", self.id))
        })?;
        Ok(TaskRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            sprint: self.sprint,
            date,
            completed: self.completed,
        })
    }
}

impl TaskStore for SqliteTaskStore {
    fn list(&self) -> PersistenceResult<Vec<TaskRecord>> {
        let conn = lock(&self.connection)?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, assigned_to, sprint, date, completed
             FROM tasks ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], RawTask::from_row)?;
        let mut tasks = Vec::new();
        for raw in rows {
            tasks.push(raw?.into_record()?);
        }
        Ok(tasks)
    }

    fn create(&self, task: NewTask) -> PersistenceResult<TaskRecord> {
        super::validate_new_task(&task)?;
        let conn = lock(&self.connection)?;
        conn.execute(
            "INSERT INTO tasks (title, description, assigned_to, sprint, date, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                task.title,
                task.description,
                task.assigned_to,
                task.sprint,
                task.date.to_string(),
                task.completed
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(task.with_id(id))
    }

    fn update(&self, update: TaskUpdate) -> PersistenceResult<TaskRecord> {
        super::validate_task_update(&update)?;
        let mut conn = lock(&self.connection)?;
        let tx = conn.transaction()?;
        let id = update.id;
        let mut task =
            Self::find(&tx, id)?.ok_or_else(|| PersistenceError::NotFound(format!("task {id}")))?;
        update.apply_to(&mut task);
        tx.execute(
            "UPDATE tasks SET title = ?1, description = ?2, assigned_to = ?3, sprint = ?4,
             date = ?5, completed = ?6 WHERE id = ?7",
            params![
                task.title,
                task.description,
                task.assigned_to,
                task.sprint,
                task.date.to_string(),
                task.completed,
                task.id
            ],
        )?;
        tx.commit()?;
        Ok(task)
    }

    fn delete(&self, id: i64) -> PersistenceResult<TaskRecord> {
        let mut conn = lock(&self.connection)?;
        let tx = conn.transaction()?;
        let task =
            Self::find(&tx, id)?.ok_or_else(|| PersistenceError::NotFound(format!("task {id}")))?;
        tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(task)
    }
}
