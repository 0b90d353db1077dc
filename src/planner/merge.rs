use super::validate::ValidatedTask;
use super::PlanMode;
use crate::models::{Day, Task};

/// Applies a validated batch to a week and returns the new week.
///
/// Daily mode replaces the target day's tasks and copies every other day
/// as is. Weekly mode replaces every day's tasks with the records assigned
/// to it, leaving days that received none empty.
pub fn merge(mode: PlanMode, batch: &[ValidatedTask], days: &[Day]) -> Vec<Day> {
    days.iter()
        .map(|day| {
            let tasks = match mode {
                PlanMode::Daily(target) if day.name == target => {
                    batch.iter().map(to_task).collect()
                }
                PlanMode::Daily(_) => return day.clone(),
                PlanMode::Weekly => batch
                    .iter()
                    .filter(|v| v.day == Some(day.name))
                    .map(to_task)
                    .collect(),
            };
            Day { id: day.id, name: day.name, tasks }
        })
        .collect()
}

/// A fresh, uncompleted task for a validated record, displayed as
/// `"<task> (<start>-<end>)"`.
pub fn to_task(v: &ValidatedTask) -> Task {
    let mut task = Task::new(
        format!(
            "{} ({}-{})",
            v.task,
            v.start_time.format("%H:%M"),
            v.end_time.format("%H:%M")
        ),
        v.credits,
    );
    task.start_time = Some(v.start_time);
    task.end_time = Some(v.end_time);
    task.note = Some(v.notes.clone()).filter(|n| !n.is_empty());
    task
}
