use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use thiserror::Error;

use super::extract::{RawModelTask, DEFAULT_CREDITS};
use super::PlanMode;
use crate::models::Weekday;

pub const MIN_CREDITS: u32 = 1;
pub const MAX_CREDITS: u32 = 10;

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the reply contained no tasks")]
    EmptyBatch,
    #[error("task #{} is invalid: {reason}", .index + 1)]
    InvalidRecord { index: usize, reason: String },
}

/// A model record that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    pub task: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Always within `MIN_CREDITS..=MAX_CREDITS`.
    pub credits: u32,
    pub notes: String,
    /// Set in weekly mode only.
    pub day: Option<Weekday>,
}

/// Validates a whole batch. One bad record rejects the batch; nothing is
/// dropped silently.
pub fn validate_batch(
    raw: &[RawModelTask],
    mode: PlanMode,
) -> Result<Vec<ValidatedTask>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    raw.iter()
        .enumerate()
        .map(|(index, r)| {
            validate_record(r, mode)
                .map_err(|reason| ValidationError::InvalidRecord { index, reason })
        })
        .collect()
}

/// Checks one record. The error is a human-readable reason.
pub fn validate_record(raw: &RawModelTask, mode: PlanMode) -> Result<ValidatedTask, String> {
    let task = raw
        .task
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("missing \"task\"")?
        .to_string();
    let start_time = parse_clock(raw.start_time.as_deref(), "start_time")?;
    let end_time = parse_clock(raw.end_time.as_deref(), "end_time")?;

    let day = match mode {
        PlanMode::Daily(_) => None,
        PlanMode::Weekly => {
            let name = raw.day.as_deref().ok_or("missing \"day\"")?;
            Some(
                Weekday::parse_loose(name)
                    .ok_or_else(|| format!("\"day\" '{}' is not a weekday", name))?,
            )
        }
    };

    Ok(ValidatedTask {
        task,
        start_time,
        end_time,
        credits: clamp_credits(raw.credits),
        notes: raw.notes.as_deref().map(str::trim).unwrap_or_default().to_string(),
        day,
    })
}

/// Rounds to a whole number and clamps into `MIN_CREDITS..=MAX_CREDITS`;
/// missing credits count as the default.
pub fn clamp_credits(credits: Option<f64>) -> u32 {
    let c = credits.filter(|c| c.is_finite()).unwrap_or(DEFAULT_CREDITS).round();
    c.clamp(MIN_CREDITS as f64, MAX_CREDITS as f64) as u32
}

fn parse_clock(value: Option<&str>, field: &str) -> Result<NaiveTime, String> {
    let value = value.map(str::trim).ok_or_else(|| format!("missing \"{}\"", field))?;
    CLOCK_TIME
        .captures(value)
        .and_then(|caps| {
            let hour = caps[1].parse().ok()?;
            let minute = caps[2].parse().ok()?;
            NaiveTime::from_hms_opt(hour, minute, 0)
        })
        .ok_or_else(|| format!("\"{}\" '{}' is not a 24-hour HH:MM time", field, value))
}
