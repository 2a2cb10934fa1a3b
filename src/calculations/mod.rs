pub mod assignment;
pub mod progress;

pub use assignment::{GENERAL_TASK, SprintPartition, TaskRotation};
pub use progress::{SprintProgress, progress_for, sprint_progress};
