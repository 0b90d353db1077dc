use super::PlanMode;

const DAILY_EXAMPLE: &str = r#"[
  {"task": "Morning workout", "start_time": "07:00", "end_time": "08:00", "credits": 6, "notes": "Warm up for 10 minutes first"},
  {"task": "Study algorithms", "start_time": "09:30", "end_time": "11:00", "credits": 9, "notes": "Focus on graph problems"}
]"#;

const WEEKLY_EXAMPLE: &str = r#"[
  {"task": "Morning workout", "start_time": "07:00", "end_time": "08:00", "credits": 6, "notes": "Warm up for 10 minutes first", "day": "Monday"},
  {"task": "Grocery shopping", "start_time": "17:30", "end_time": "18:15", "credits": 3, "notes": "Bring the list", "day": "Thursday"}
]"#;

/// Builds the request text sent to the model: the user's goals followed by
/// the exact output contract the extractor's strict path expects.
pub fn build_prompt(goal: &str, mode: PlanMode) -> String {
    let goal = goal.trim();
    match mode {
        PlanMode::Daily(day) => format!(
            "{goal}\n\n\
             Create a timetable for {day} based on my goals above.\n\
             Respond with ONLY a JSON array. Each element must be an object with exactly these keys:\n\
             - \"task\": short description of the activity\n\
             - \"start_time\": start in 24-hour HH:MM format\n\
             - \"end_time\": end in 24-hour HH:MM format\n\
             - \"credits\": integer reward from 1 (trivial) to 10 (very demanding)\n\
             - \"notes\": one short tip or detail, may be an empty string\n\n\
             Example:\n{DAILY_EXAMPLE}\n\n\
             Do not add any text before or after the array."
        ),
        PlanMode::Weekly => format!(
            "{goal}\n\n\
             Create a weekly timetable (Monday to Sunday) based on my goals above.\n\
             Respond with ONLY a JSON array. Each element must be an object with exactly these keys:\n\
             - \"task\": short description of the activity\n\
             - \"start_time\": start in 24-hour HH:MM format\n\
             - \"end_time\": end in 24-hour HH:MM format\n\
             - \"credits\": integer reward from 1 (trivial) to 10 (very demanding)\n\
             - \"notes\": one short tip or detail, may be an empty string\n\
             - \"day\": the full English weekday name, Monday to Sunday\n\n\
             Example:\n{WEEKLY_EXAMPLE}\n\n\
             Do not add any text before or after the array."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;
    use crate::planner::extract::extract_tasks;

    #[test]
    fn daily_prompt_names_target_day_and_omits_day_key() {
        let p = build_prompt("  gym and reading  ", PlanMode::Daily(Weekday::Tuesday));
        assert!(p.starts_with("gym and reading\n"));
        assert!(p.contains("timetable for Tuesday"));
        assert!(!p.contains("\"day\""));
    }

    #[test]
    fn worked_examples_satisfy_the_strict_path() {
        let daily = extract_tasks(DAILY_EXAMPLE);
        assert_eq!(daily.len(), 2);
        assert!(daily.iter().all(|t| t.day.is_none()));

        let weekly = extract_tasks(WEEKLY_EXAMPLE);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[1].day.as_deref(), Some("Thursday"));
        assert!(build_prompt("x", PlanMode::Weekly).contains(WEEKLY_EXAMPLE));
    }
}
