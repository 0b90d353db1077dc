use planust::models::{Day, PlannerState, Task, TaskId, Weekday};
use planust::schedule::{Schedule, ScheduleError, Toggled};

fn schedule_with(points: &[u32]) -> (Schedule, Vec<TaskId>) {
    let mut schedule = Schedule::default();
    let ids = points
        .iter()
        .enumerate()
        .map(|(i, &p)| schedule.add_task(Weekday::ALL[i % 7], Task::new(format!("task {}", i), p)))
        .collect();
    (schedule, ids)
}

fn completed_sum(schedule: &Schedule) -> i64 {
    schedule
        .days()
        .iter()
        .flat_map(|d| d.tasks.iter())
        .filter(|t| t.completed)
        .map(|t| i64::from(t.points))
        .sum()
}

#[test]
fn test_toggle_round_trip_restores_total() {
    let (mut schedule, ids) = schedule_with(&[7, 3]);
    schedule.toggle_task(ids[1]).unwrap();
    let before = schedule.total_points();

    assert_eq!(schedule.toggle_task(ids[0]), Ok(Toggled::Completed { points: 7 }));
    assert_eq!(schedule.total_points(), before + 7);
    assert_eq!(schedule.toggle_task(ids[0]), Ok(Toggled::Reopened { points: 7 }));
    assert_eq!(schedule.total_points(), before);
}

#[test]
fn test_total_tracks_completed_points() {
    let (mut schedule, ids) = schedule_with(&[5, 9, 2, 4]);
    schedule.toggle_task(ids[0]).unwrap();
    schedule.toggle_task(ids[1]).unwrap();
    schedule.toggle_task(ids[3]).unwrap();
    schedule.toggle_task(ids[1]).unwrap();
    schedule.edit_points(ids[0], "11").unwrap();
    schedule.edit_points(ids[2], "6").unwrap();
    assert_eq!(schedule.total_points(), completed_sum(&schedule));
    assert_eq!(schedule.total_points(), 15);
}

#[test]
fn test_edit_points_only_moves_total_when_completed() {
    let (mut schedule, ids) = schedule_with(&[5, 5]);
    schedule.toggle_task(ids[0]).unwrap();

    assert_eq!(schedule.edit_points(ids[0], "8"), Ok(8));
    assert_eq!(schedule.total_points(), 8);
    assert_eq!(schedule.edit_points(ids[0], " 2 "), Ok(2));
    assert_eq!(schedule.total_points(), 2);

    assert_eq!(schedule.edit_points(ids[1], "9"), Ok(9));
    assert_eq!(schedule.total_points(), 2);
    assert_eq!(schedule.find_task(ids[1]).unwrap().1.points, 9);
}

#[test]
fn test_edit_points_rejects_bad_input() {
    let (mut schedule, ids) = schedule_with(&[5]);
    schedule.toggle_task(ids[0]).unwrap();
    for bad in ["abc", "2.5", "", "0", "-3"] {
        assert!(matches!(schedule.edit_points(ids[0], bad), Err(ScheduleError::InvalidPoints(_))));
    }
    assert_eq!(schedule.find_task(ids[0]).unwrap().1.points, 5);
    assert_eq!(schedule.total_points(), 5);
    assert_eq!(schedule.editing(), None);
}

#[test]
fn test_open_edit_blocks_toggle_and_delete() {
    let (mut schedule, ids) = schedule_with(&[5, 6]);
    assert_eq!(schedule.begin_edit_points(ids[0]), Ok(5));

    assert_eq!(schedule.toggle_task(ids[1]), Err(ScheduleError::EditInProgress));
    assert_eq!(schedule.delete_task(ids[1]).unwrap_err(), ScheduleError::EditInProgress);
    assert_eq!(schedule.begin_edit_points(ids[1]), Err(ScheduleError::EditInProgress));

    // Bad input keeps the edit open.
    assert!(schedule.commit_edit_points("x").is_err());
    assert_eq!(schedule.editing(), Some(ids[0]));

    assert_eq!(schedule.commit_edit_points("4"), Ok(4));
    assert_eq!(schedule.editing(), None);
    assert!(schedule.toggle_task(ids[1]).is_ok());
}

#[test]
fn test_cancelled_edit_unblocks() {
    let (mut schedule, ids) = schedule_with(&[5]);
    schedule.begin_edit_points(ids[0]).unwrap();
    schedule.cancel_edit();
    assert_eq!(schedule.commit_edit_points("3"), Err(ScheduleError::NoEditInProgress));
    assert!(schedule.delete_task(ids[0]).is_ok());
}

#[test]
fn test_delete_completed_task_banks_points() {
    let (mut schedule, ids) = schedule_with(&[5, 6]);
    schedule.toggle_task(ids[0]).unwrap();

    let removed = schedule.delete_task(ids[0]).unwrap();
    assert!(removed.completed);
    assert_eq!(schedule.total_points(), 5);
    assert!(schedule.find_task(ids[0]).is_none());
    assert_eq!(schedule.delete_task(ids[0]).unwrap_err(), ScheduleError::TaskNotFound(ids[0].to_string()));
}

#[test]
fn test_redeem() {
    let (mut schedule, ids) = schedule_with(&[30, 25]);
    schedule.toggle_task(ids[0]).unwrap();
    schedule.toggle_task(ids[1]).unwrap();

    assert!(!schedule.redeem(100));
    assert_eq!(schedule.total_points(), 55);
    assert!(schedule.redeem(50));
    assert_eq!(schedule.total_points(), 5);
    assert!(schedule.redeem(5));
    assert_eq!(schedule.total_points(), 0);
    assert!(!schedule.redeem(-10));
    assert_eq!(schedule.total_points(), 0);
}

#[test]
fn test_resolve_id_by_prefix() {
    let (schedule, ids) = schedule_with(&[1, 2]);
    let full = ids[0].to_string();
    assert_eq!(schedule.resolve_id(&full), Ok(ids[0]));
    assert_eq!(schedule.resolve_id(&ids[0].short()), Ok(ids[0]));
    assert_eq!(schedule.resolve_id(&full.to_uppercase()), Ok(ids[0]));
    assert!(matches!(schedule.resolve_id("zzz"), Err(ScheduleError::TaskNotFound(_))));
    assert!(matches!(schedule.resolve_id(""), Err(ScheduleError::TaskNotFound(_))));
}

#[test]
fn test_from_state_restores_canonical_week() {
    let state = PlannerState {
        days: vec![
            Day { id: 42, name: Weekday::Friday, tasks: vec![Task::new("keep", 3)] },
            Day::empty(Weekday::Monday),
        ],
        total_points: 12,
    };
    let schedule = Schedule::from_state(state);
    let names: Vec<_> = schedule.days().iter().map(|d| d.name).collect();
    assert_eq!(names, Weekday::ALL);
    let ids: Vec<_> = schedule.days().iter().map(|d| d.id).collect();
    assert_eq!(ids, [0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(schedule.day(Weekday::Friday).tasks[0].text, "keep");
    assert_eq!(schedule.total_points(), 12);
}

#[test]
fn test_reset_recreates_empty_week() {
    let (mut schedule, ids) = schedule_with(&[4, 4, 4]);
    schedule.toggle_task(ids[2]).unwrap();
    schedule.reset();
    assert!(schedule.days().iter().all(|d| d.tasks.is_empty()));
    assert_eq!(schedule.days().len(), 7);
    assert_eq!(schedule.total_points(), 0);
}

#[test]
fn test_replace_day_tasks_leaves_other_days() {
    let (mut schedule, ids) = schedule_with(&[3, 3]);
    schedule.toggle_task(ids[0]).unwrap();
    let tuesday = schedule.day(Weekday::Tuesday).clone();

    schedule.replace_day_tasks(Weekday::Monday, vec![Task::new("fresh", 2)]);

    assert_eq!(schedule.day(Weekday::Monday).tasks.len(), 1);
    assert_eq!(schedule.day(Weekday::Monday).tasks[0].text, "fresh");
    assert_eq!(schedule.day(Weekday::Tuesday), &tuesday);
    assert_eq!(schedule.total_points(), 3);
}
