use chrono::NaiveTime;
use planust::models::{canonical_week, Day, Task, Weekday};
use planust::planner::merge::merge;
use planust::planner::validate::ValidatedTask;
use planust::planner::PlanMode;

fn validated(task: &str, h: u32, credits: u32, day: Option<Weekday>) -> ValidatedTask {
    ValidatedTask {
        task: task.into(),
        start_time: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(h + 1, 0, 0).unwrap(),
        credits,
        notes: String::new(),
        day,
    }
}

fn populated_week() -> Vec<Day> {
    let mut week = canonical_week();
    for day in week.iter_mut() {
        let mut done = Task::new(format!("{} chores", day.name), 4);
        done.completed = true;
        day.tasks.push(done);
        day.tasks.push(Task::new(format!("{} errands", day.name), 6));
    }
    week
}

#[test]
fn test_daily_merge_replaces_only_target() {
    let week = populated_week();
    let batch = vec![validated("Yoga", 7, 8, None), validated("Read", 21, 3, None)];

    let merged = merge(PlanMode::Daily(Weekday::Wednesday), &batch, &week);

    assert_eq!(merged.len(), 7);
    for (before, after) in week.iter().zip(&merged) {
        if before.name == Weekday::Wednesday {
            assert_eq!(after.id, before.id);
            let texts: Vec<_> = after.tasks.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(texts, ["Yoga (07:00-08:00)", "Read (21:00-22:00)"]);
            assert!(after.tasks.iter().all(|t| !t.completed));
            assert_eq!(after.tasks[0].points, 8);
            assert_eq!(after.tasks[0].start_time, NaiveTime::from_hms_opt(7, 0, 0));
            assert_eq!(after.tasks[0].end_time, NaiveTime::from_hms_opt(8, 0, 0));
        } else {
            assert_eq!(after, before);
        }
    }
}

#[test]
fn test_merged_tasks_get_fresh_ids() {
    let batch = vec![validated("Yoga", 7, 8, None), validated("Yoga", 7, 8, None)];
    let merged = merge(PlanMode::Daily(Weekday::Monday), &batch, &canonical_week());
    let tasks = &merged[0].tasks;
    assert_ne!(tasks[0].id, tasks[1].id);
    assert_eq!(tasks[0].note, None);
}

#[test]
fn test_weekly_merge_replaces_every_day() {
    let week = populated_week();
    let batch = vec![
        validated("Gym", 18, 6, Some(Weekday::Monday)),
        validated("Piano", 19, 5, Some(Weekday::Monday)),
        validated("Hike", 9, 9, Some(Weekday::Sunday)),
    ];

    let merged = merge(PlanMode::Weekly, &batch, &week);

    assert_eq!(merged.len(), 7);
    assert_eq!(merged[0].tasks.len(), 2);
    assert_eq!(merged[0].tasks[0].text, "Gym (18:00-19:00)");
    assert_eq!(merged[0].tasks[1].text, "Piano (19:00-20:00)");
    assert_eq!(merged[6].tasks.len(), 1);
    assert_eq!(merged[6].tasks[0].text, "Hike (09:00-10:00)");
    for day in &merged[1..6] {
        assert!(day.tasks.is_empty(), "{} should have been cleared", day.name);
    }
    for (before, after) in week.iter().zip(&merged) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.name, after.name);
    }
}
