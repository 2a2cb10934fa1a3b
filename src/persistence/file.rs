use super::{PersistenceError, PersistenceResult, ProjectStore};
use crate::calendar::Day;
use crate::project::Project;
use crate::schedule::{Assignment, Schedule, ScheduleRow};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const PROJECTS_FILE: &str = "projects.json";
const LAST_OPENED_FILE: &str = "last_opened";

/// Keeps the project list as a JSON array inside a data directory, next to a
/// small file naming the last opened project.
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    dir: PathBuf,
}

impl JsonProjectStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn projects_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    fn last_opened_path(&self) -> PathBuf {
        self.dir.join(LAST_OPENED_FILE)
    }
}

impl ProjectStore for JsonProjectStore {
    fn save_projects(&self, projects: &[Project]) -> PersistenceResult<()> {
        super::validate_projects(projects)?;
        fs::create_dir_all(&self.dir)?;
        save_projects_to_json(projects, self.projects_path())?;
        log::debug!(
            "saved {} project(s) to {}",
            projects.len(),
            self.projects_path().display()
        );
        Ok(())
    }

    fn load_projects(&self) -> PersistenceResult<Vec<Project>> {
        match load_projects_from_json(self.projects_path()) {
            Err(PersistenceError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            other => other,
        }
    }

    fn save_last_opened(&self, id: Option<&str>) -> PersistenceResult<()> {
        match id {
            Some(id) => {
                fs::create_dir_all(&self.dir)?;
                fs::write(self.last_opened_path(), id)?;
            }
            None => match fs::remove_file(self.last_opened_path()) {
                Err(err) if err.kind() != ErrorKind::NotFound => return Err(err.into()),
                _ => {}
            },
        }
        Ok(())
    }

    fn load_last_opened(&self) -> PersistenceResult<Option<String>> {
        match fs::read_to_string(self.last_opened_path()) {
            Ok(contents) => {
                let id = contents.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn save_projects_to_json<P: AsRef<Path>>(
    projects: &[Project],
    path: P,
) -> PersistenceResult<()> {
    super::validate_projects(projects)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, projects)?;
    Ok(())
}

pub fn load_projects_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Project>> {
    let file = File::open(path)?;
    let projects: Vec<Project> = serde_json::from_reader(file)?;
    super::validate_projects(&projects)?;
    Ok(projects)
}

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentCsvRecord {
    date: Day,
    sprint: String,
    member: String,
    task: String,
    done: bool,
}

/// Writes one CSV line per assignment.
pub fn save_schedule_to_csv<P: AsRef<Path>>(schedule: &Schedule, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in schedule.rows() {
        for assignment in &row.assignments {
            writer.serialize(AssignmentCsvRecord {
                date: row.date,
                sprint: row.sprint.clone(),
                member: assignment.member.clone(),
                task: assignment.task.clone(),
                done: assignment.done,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads a schedule written by [`save_schedule_to_csv`]. Consecutive lines
/// sharing a date form one row.
pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows: Vec<ScheduleRow> = Vec::new();
    for record in reader.deserialize::<AssignmentCsvRecord>() {
        let record = record?;
        let assignment = Assignment {
            member: record.member,
            task: record.task,
            done: record.done,
        };
        if let Some(row) = rows.last_mut() {
            if row.date == record.date {
                if row.sprint != record.sprint {
                    return Err(PersistenceError::InvalidData(format!(
                        "day {} is listed under sprints '{}' and '{}'",
                        record.date, row.sprint, record.sprint
                    )));
                }
                row.assignments.push(assignment);
                continue;
            }
            if row.date > record.date {
                return Err(PersistenceError::InvalidData(format!(
                    "day {} appears after {}; rows must be in ascending order",
                    record.date, row.date
                )));
            }
        }
        rows.push(ScheduleRow {
            date: record.date,
            sprint: record.sprint,
            assignments: vec![assignment],
        });
    }
    Ok(Schedule::from_rows(rows))
}
