use crate::schedule::{Schedule, ScheduleRow};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintProgress {
    pub sprint: String,
    /// Rounded completion, 0 to 100.
    pub percent: u8,
    pub days: usize,
}

fn row_fraction(row: &ScheduleRow) -> f64 {
    let total = row.assignments.len();
    if total == 0 {
        return 0.0;
    }
    let done = row.assignments.iter().filter(|a| a.done).count();
    done as f64 / total as f64
}

/// Per-sprint completion, in order of first appearance.
///
/// Each row contributes its own done/total fraction; a sprint's percentage
/// is the mean of its rows' fractions, so every day weighs the same no
/// matter how many assignments it holds.
pub fn sprint_progress(schedule: &Schedule) -> Vec<SprintProgress> {
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for row in schedule.rows() {
        let fraction = row_fraction(row);
        match sums.iter_mut().find(|(name, _, _)| *name == row.sprint) {
            Some(entry) => {
                entry.1 += fraction;
                entry.2 += 1;
            }
            None => sums.push((row.sprint.as_str(), fraction, 1)),
        }
    }
    sums.into_iter()
        .map(|(sprint, sum, days)| SprintProgress {
            sprint: sprint.to_string(),
            percent: ((sum / days as f64) * 100.0).round() as u8,
            days,
        })
        .collect()
}

/// Percentage for a single sprint, if it appears in the schedule.
pub fn progress_for(schedule: &Schedule, sprint: &str) -> Option<u8> {
    sprint_progress(schedule)
        .into_iter()
        .find(|p| p.sprint == sprint)
        .map(|p| p.percent)
}
