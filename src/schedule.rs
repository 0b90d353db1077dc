//! The schedule store.
//!
//! Owns the seven days and the points ledger. Every mutation that touches a
//! task's `completed` flag or `points` value adjusts `total_points` in the
//! same call, so the total always equals the points of completed tasks on the
//! schedule, plus banked points of completed tasks that have since left it,
//! minus redeemed rewards.

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{canonical_week, Day, PlannerState, Task, TaskId, Weekday};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Task {0} not found.")]
    TaskNotFound(String),
    #[error("Task id '{0}' is ambiguous; use more characters.")]
    AmbiguousId(String),
    #[error("A point-value edit is in progress.")]
    EditInProgress,
    #[error("No point-value edit is in progress.")]
    NoEditInProgress,
    #[error("Invalid point value '{0}': expected a whole number of at least 1.")]
    InvalidPoints(String),
}

/// Result of flipping a task's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The task is now done and its points were credited.
    Completed { points: u32 },
    /// The task was reopened and its points were taken back.
    Reopened { points: u32 },
}

#[derive(Debug, Clone)]
pub struct Schedule {
    state: PlannerState,
    editing: Option<TaskId>,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::from_state(PlannerState::default())
    }
}

impl Schedule {
    /// Wraps a loaded state, restoring the canonical seven days in
    /// Monday..Sunday order if the snapshot is missing or reorders any.
    pub fn from_state(state: PlannerState) -> Self {
        let PlannerState { mut days, total_points } = state;
        let normalized = Weekday::ALL
            .into_iter()
            .map(|name| match days.iter().position(|d| d.name == name) {
                Some(pos) => {
                    let mut day = days.swap_remove(pos);
                    day.id = name.index();
                    day
                }
                None => Day::empty(name),
            })
            .collect();
        Schedule {
            state: PlannerState { days: normalized, total_points },
            editing: None,
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn days(&self) -> &[Day] {
        &self.state.days
    }

    pub fn total_points(&self) -> i64 {
        self.state.total_points
    }

    pub fn day(&self, name: Weekday) -> &Day {
        &self.state.days[name.index() as usize]
    }

    fn day_mut(&mut self, name: Weekday) -> &mut Day {
        &mut self.state.days[name.index() as usize]
    }

    /// The task being edited, if any.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Finds a task and the day that holds it.
    pub fn find_task(&self, id: TaskId) -> Option<(Weekday, &Task)> {
        self.state
            .days
            .iter()
            .find_map(|d| d.tasks.iter().find(|t| t.id == id).map(|t| (d.name, t)))
    }

    fn find_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.state
            .days
            .iter_mut()
            .flat_map(|d| d.tasks.iter_mut())
            .find(|t| t.id == id)
    }

    /// Resolves a (possibly shortened) id typed by the user.
    pub fn resolve_id(&self, prefix: &str) -> Result<TaskId, ScheduleError> {
        let mut hits = self
            .state
            .days
            .iter()
            .flat_map(|d| d.tasks.iter())
            .filter(|t| t.id.matches_prefix(prefix))
            .map(|t| t.id);
        match (hits.next(), hits.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(ScheduleError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(ScheduleError::TaskNotFound(prefix.to_string())),
        }
    }

    /// Appends a task to the end of a day.
    pub fn add_task(&mut self, day: Weekday, task: Task) -> TaskId {
        let id = task.id;
        debug!(day = %day, task = %id, "adding task");
        self.day_mut(day).tasks.push(task);
        id
    }

    /// Replaces one day's task list wholesale. Points of any completed task
    /// that is dropped stay banked.
    pub fn replace_day_tasks(&mut self, day: Weekday, tasks: Vec<Task>) {
        self.day_mut(day).tasks = tasks;
    }

    /// Installs a complete week produced by a plan merge.
    pub fn replace_week(&mut self, days: Vec<Day>) {
        let total_points = self.state.total_points;
        *self = Schedule::from_state(PlannerState { days, total_points });
    }

    /// Flips a task's completion flag and moves its points in or out of the total.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<Toggled, ScheduleError> {
        if self.editing.is_some() {
            return Err(ScheduleError::EditInProgress);
        }
        let task = self
            .find_task_mut(id)
            .ok_or_else(|| ScheduleError::TaskNotFound(id.to_string()))?;
        task.completed = !task.completed;
        let points = task.points;
        let toggled = if task.completed {
            self.state.total_points += i64::from(points);
            Toggled::Completed { points }
        } else {
            self.state.total_points -= i64::from(points);
            Toggled::Reopened { points }
        };
        info!(task = %id, ?toggled, total = self.state.total_points, "task toggled");
        Ok(toggled)
    }

    /// Opens a point-value edit on a task; toggles and deletes are refused
    /// until it is committed or cancelled. Returns the current value.
    pub fn begin_edit_points(&mut self, id: TaskId) -> Result<u32, ScheduleError> {
        if self.editing.is_some() {
            return Err(ScheduleError::EditInProgress);
        }
        let points = self
            .find_task(id)
            .map(|(_, t)| t.points)
            .ok_or_else(|| ScheduleError::TaskNotFound(id.to_string()))?;
        self.editing = Some(id);
        Ok(points)
    }

    /// Commits the open edit with the user's raw input. Non-integer or
    /// non-positive input leaves everything unchanged and the edit open.
    pub fn commit_edit_points(&mut self, input: &str) -> Result<u32, ScheduleError> {
        let id = self.editing.ok_or(ScheduleError::NoEditInProgress)?;
        let new_value = match input.trim().parse::<u32>() {
            Ok(v) if v >= 1 => v,
            _ => return Err(ScheduleError::InvalidPoints(input.trim().to_string())),
        };
        let task = match self.find_task_mut(id) {
            Some(t) => t,
            None => {
                self.editing = None;
                return Err(ScheduleError::TaskNotFound(id.to_string()));
            }
        };
        let delta = i64::from(new_value) - i64::from(task.points);
        task.points = new_value;
        if task.completed {
            self.state.total_points += delta;
        }
        self.editing = None;
        info!(task = %id, points = new_value, delta, "points edited");
        Ok(new_value)
    }

    /// Abandons the open edit, if any.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// One-shot edit: open, commit, and close the edit even on bad input.
    pub fn edit_points(&mut self, id: TaskId, input: &str) -> Result<u32, ScheduleError> {
        self.begin_edit_points(id)?;
        let res = self.commit_edit_points(input);
        self.cancel_edit();
        res
    }

    /// Removes a task. A completed task's points stay in the total (banked).
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, ScheduleError> {
        if self.editing.is_some() {
            return Err(ScheduleError::EditInProgress);
        }
        for day in self.state.days.iter_mut() {
            if let Some(pos) = day.tasks.iter().position(|t| t.id == id) {
                return Ok(day.tasks.remove(pos));
            }
        }
        Err(ScheduleError::TaskNotFound(id.to_string()))
    }

    /// Spends `cost` points. Returns false, and changes nothing, when the
    /// total does not cover it.
    pub fn redeem(&mut self, cost: i64) -> bool {
        if cost < 0 || self.state.total_points < cost {
            return false;
        }
        self.state.total_points -= cost;
        info!(cost, total = self.state.total_points, "reward redeemed");
        true
    }

    /// Recreates the canonical empty week and zeroes the ledger.
    pub fn reset(&mut self) {
        self.state = PlannerState {
            days: canonical_week(),
            total_points: 0,
        };
        self.editing = None;
    }
}
