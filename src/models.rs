use std::fmt;

use chrono::{Datelike, Local, NaiveTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the seven fixed weekday containers.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The canonical, capitalized name (`"Monday"`).
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Stable day id, 0 for Monday through 6 for Sunday.
    pub fn index(self) -> u8 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Matches a free-form day name against the canonical names, ignoring case
    /// and surrounding whitespace.
    pub fn parse_loose(s: &str) -> Option<Weekday> {
        let s = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
    }

    /// The current local weekday.
    pub fn today() -> Weekday {
        match Local::now().weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique token identifying a task.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }

    /// First eight hex digits, enough to address a task from the command line.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// True if `prefix` is a leading part of this id, in either the hyphenated
    /// or the simple form.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_ascii_lowercase();
        !prefix.is_empty()
            && (self.0.simple().to_string().starts_with(&prefix)
                || self.0.hyphenated().to_string().starts_with(&prefix))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A schedulable, completable unit of work with a point value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task.
    pub id: TaskId,
    /// Display text.
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Reward value credited to the ledger on completion.
    pub points: u32,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

impl Task {
    /// A fresh, uncompleted task with a newly generated id.
    pub fn new(text: impl Into<String>, points: u32) -> Self {
        Task {
            id: TaskId::new(),
            text: text.into(),
            completed: false,
            points,
            start_time: None,
            end_time: None,
            note: None,
        }
    }

    /// `"07:00-08:00"` when both ends are known, `"07:00"` when only the start is.
    pub fn time_range(&self) -> Option<String> {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => Some(format!("{}-{}", s.format("%H:%M"), e.format("%H:%M"))),
            (Some(s), None) => Some(s.format("%H:%M").to_string()),
            _ => None,
        }
    }
}

/// One weekday and its ordered task list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Day {
    /// Stable id, 0 (Monday) through 6 (Sunday).
    pub id: u8,
    pub name: Weekday,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Day {
    pub fn empty(name: Weekday) -> Self {
        Day { id: name.index(), name, tasks: Vec::new() }
    }
}

/// The persisted snapshot: the whole week plus the points total.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    pub days: Vec<Day>,
    #[serde(default)]
    pub total_points: i64,
}

impl Default for PlannerState {
    fn default() -> Self {
        PlannerState {
            days: canonical_week(),
            total_points: 0,
        }
    }
}

/// The seven empty days, Monday through Sunday.
pub fn canonical_week() -> Vec<Day> {
    Weekday::ALL.into_iter().map(Day::empty).collect()
}
