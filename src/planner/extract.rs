//! Pulls candidate task records out of the model's raw reply.
//!
//! Two strategies, tried in order:
//! - **JSON envelope** (primary): the text between the first `[` and the last
//!   `]`, parsed as a JSON array of objects.
//! - **Timetable lines** (fallback): one record per line shaped like
//!   `07:00 - 08:00: Yoga | Priority: high | Notes: bring a mat`.
//!
//! Neither strategy fails: malformed input yields an empty list.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Credits assumed when a record carries none, or when the fallback line has
/// no recognised priority.
pub const DEFAULT_CREDITS: f64 = 5.0;

static TIMETABLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-•*]\s*)?(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})\s*:?\s*(.*?)\s*$").unwrap()
});

static LABELED_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:(priority|notes))\s*:\s*(.*)$").unwrap());

/// An untrusted, unvalidated record as the model produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModelTask {
    pub task: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub credits: Option<f64>,
    pub notes: Option<String>,
    pub day: Option<String>,
}

/// Extracts every candidate record from `text`, in source order.
pub fn extract_tasks(text: &str) -> Vec<RawModelTask> {
    if let Some(tasks) = extract_json_array(text) {
        debug!(count = tasks.len(), "extracted records from JSON envelope");
        return tasks;
    }
    let tasks = extract_timetable_lines(text);
    debug!(count = tasks.len(), "extracted records from timetable lines");
    tasks
}

/// Strict path. `None` when there is no `[`…`]` envelope or its contents are
/// not a JSON array.
pub fn extract_json_array(text: &str) -> Option<Vec<RawModelTask>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Array(items)) => Some(items.iter().map(raw_from_value).collect()),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "bracketed text is not a JSON array");
            None
        }
    }
}

/// Fallback path: one record per line matching the timetable pattern.
///
/// After the time range the line is split on `|`. The first segment is the
/// task; `Priority:` and `Notes:` segments are read by label, and any other
/// segment is kept as a note. A `Notes:` segment swallows the rest of the line.
pub fn extract_timetable_lines(text: &str) -> Vec<RawModelTask> {
    text.lines()
        .filter_map(|line| {
            let caps = TIMETABLE_LINE.captures(line)?;
            let mut segments = caps.get(3)?.as_str().split('|');
            let task = segments.next()?.trim();
            if task.is_empty() {
                return None;
            }

            let mut credits = DEFAULT_CREDITS;
            let mut notes: Vec<String> = Vec::new();
            while let Some(segment) = segments.next() {
                let Some(label) = LABELED_SEGMENT.captures(segment.trim_start()) else {
                    notes.push(segment.trim().to_string());
                    continue;
                };
                if label[1].eq_ignore_ascii_case("priority") {
                    credits = priority_credits(&label[2]).unwrap_or(DEFAULT_CREDITS);
                    continue;
                }
                let mut note = label[2].to_string();
                for tail in segments.by_ref() {
                    note.push('|');
                    note.push_str(tail);
                }
                notes.push(note.trim().to_string());
            }
            notes.retain(|n| !n.is_empty());

            Some(RawModelTask {
                task: Some(task.to_string()),
                start_time: Some(caps[1].to_string()),
                end_time: Some(caps[2].to_string()),
                credits: Some(credits),
                notes: (!notes.is_empty()).then(|| notes.join("; ")),
                day: None,
            })
        })
        .collect()
}

/// `high`, `medium` and `low`, in any case, map to 9, 6 and 3.
fn priority_credits(word: &str) -> Option<f64> {
    match word.trim().to_ascii_lowercase().as_str() {
        "high" => Some(9.0),
        "medium" => Some(6.0),
        "low" => Some(3.0),
        _ => None,
    }
}

fn raw_from_value(value: &Value) -> RawModelTask {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    RawModelTask {
        task: text("task"),
        start_time: text("start_time"),
        end_time: text("end_time"),
        credits: value.get("credits").and_then(numeric),
        notes: text("notes"),
        day: text("day"),
    }
}

/// Numbers, and strings that hold a number, are accepted as credits.
fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}
