use std::io::{self, Write};

use chrono::{Local, NaiveTime, TimeDelta, Timelike};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use rand::Rng;

use crate::models::{Task, Weekday};
use crate::planner::client::LlmClient;
use crate::planner::{plan_into, PlanMode};
use crate::rewards::{find_reward, CATALOG};
use crate::schedule::{Schedule, Toggled};
use crate::storage::{delete_database, load_schedule, save_state};

/// Writes the schedule back to disk, reporting failures unless `silent`.
fn persist(schedule: &Schedule, silent: bool) -> bool {
    match save_state(schedule.state()) {
        Ok(()) => true,
        Err(e) => {
            if !silent { eprintln!("Failed to save planner: {}", e); }
            false
        }
    }
}

fn parse_time(value: &str, silent: bool) -> Option<NaiveTime> {
    match NaiveTime::parse_from_str(value.trim(), "%H:%M") {
        Ok(t) => Some(t),
        Err(e) => {
            if !silent { eprintln!("Invalid time '{}': {}. Use HH:MM (24-hour).", value, e); }
            None
        }
    }
}

/// Fills in a one-hour slot for a manual task: starting `now` when neither
/// end is given, or ending an hour after an explicit start. An explicit end
/// alone is left as is. Times wrap past midnight.
pub fn default_slot(start: Option<NaiveTime>, end: Option<NaiveTime>, now: NaiveTime) -> (Option<NaiveTime>, Option<NaiveTime>) {
    let hour = TimeDelta::hours(1);
    match (start, end) {
        (None, None) => {
            let now = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
            (Some(now), Some(now.overflowing_add_signed(hour).0))
        }
        (Some(s), None) => (Some(s), Some(s.overflowing_add_signed(hour).0)),
        other => other,
    }
}

/// Adds a task to a day (today if none is given).
///
/// Without an explicit point value the task is worth a random 5 to 19 points.
pub fn cmd_add(text: String, day: Option<Weekday>, points: Option<u32>, start: Option<String>, end: Option<String>, note: Option<String>, silent: bool) {
    if text.trim().is_empty() {
        if !silent { eprintln!("Task text cannot be empty."); }
        return;
    }
    if points == Some(0) {
        if !silent { eprintln!("Points must be at least 1."); }
        return;
    }

    let start_time = match start.as_deref().map(|s| parse_time(s, silent)) {
        Some(None) => return,
        Some(t) => t,
        None => None,
    };
    let end_time = match end.as_deref().map(|s| parse_time(s, silent)) {
        Some(None) => return,
        Some(t) => t,
        None => None,
    };

    let day = day.unwrap_or_else(Weekday::today);
    let points = points.unwrap_or_else(|| rand::rng().random_range(5..20));

    let (start_time, end_time) = default_slot(start_time, end_time, Local::now().time());

    let mut task = Task::new(text.trim(), points);
    task.start_time = start_time;
    task.end_time = end_time;
    task.note = note.filter(|n| !n.trim().is_empty());

    let mut schedule = load_schedule();
    let id = schedule.add_task(day, task);
    if persist(&schedule, silent) && !silent {
        println!("Task added to {} (id = {}, {} pts)", day, id.short(), points);
    }
}

/// Flips a task between done and pending, crediting or debiting its points.
pub fn cmd_toggle(id: String, silent: bool) {
    let mut schedule = load_schedule();
    let outcome = schedule.resolve_id(&id).and_then(|id| schedule.toggle_task(id));
    match outcome {
        Ok(toggled) => {
            if !persist(&schedule, silent) || silent {
                return;
            }
            match toggled {
                Toggled::Completed { points } => println!("+{} points! Total: {}", points, schedule.total_points()),
                Toggled::Reopened { points } => println!("Task reopened, -{} points. Total: {}", points, schedule.total_points()),
            }
        }
        Err(e) => { if !silent { eprintln!("{}", e); } }
    }
}

/// Sets a task's point value. Completed tasks move the total by the difference.
pub fn cmd_points(id: String, value: String, silent: bool) {
    let mut schedule = load_schedule();
    let outcome = schedule.resolve_id(&id).and_then(|id| schedule.edit_points(id, &value));
    match outcome {
        Ok(points) => {
            if persist(&schedule, silent) && !silent {
                println!("Task {} is now worth {} points. Total: {}", id, points, schedule.total_points());
            }
        }
        Err(e) => { if !silent { eprintln!("{}", e); } }
    }
}

/// Removes a task. Points already earned from it are kept.
pub fn cmd_remove(id: String, silent: bool) {
    let mut schedule = load_schedule();
    let outcome = schedule.resolve_id(&id).and_then(|id| schedule.delete_task(id));
    match outcome {
        Ok(task) => {
            if persist(&schedule, silent) && !silent {
                println!("Task '{}' removed.", task.text);
            }
        }
        Err(e) => { if !silent { eprintln!("{}", e); } }
    }
}

/// Lists the week, or a single day, as a table.
pub fn cmd_list(day: Option<Weekday>) {
    let schedule = load_schedule();
    let days: Vec<_> = schedule
        .days()
        .iter()
        .filter(|d| day.map_or(true, |only| d.name == only))
        .collect();

    if days.iter().all(|d| d.tasks.is_empty()) {
        println!("No tasks found.");
        println!("Total points: {}", schedule.total_points());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Day").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
            Cell::new("Pts").add_attribute(Attribute::Bold),
            Cell::new("Note").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for d in days {
        for t in &d.tasks {
            let status = if t.completed { "Done" } else { "Pending" };
            let status_color = if t.completed { Color::Green } else { Color::Yellow };
            table.add_row(vec![
                Cell::new(d.name),
                Cell::new(t.id.short()),
                Cell::new(&t.text),
                Cell::new(t.time_range().unwrap_or_default()),
                Cell::new(format!("+{}", t.points)),
                Cell::new(t.note.clone().unwrap_or_default()),
                Cell::new(status).fg(status_color),
            ]);
        }
    }

    println!("{table}");
    println!("Total points: {}", schedule.total_points());
}

/// Lists the reward catalog and which rewards are affordable.
pub fn cmd_rewards() {
    let total = load_schedule().total_points();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL)
        .set_header(vec!["", "Reward", "Cost", "Available"]);
    for r in CATALOG {
        let available = total >= r.cost;
        table.add_row(vec![
            Cell::new(r.icon),
            Cell::new(r.name),
            Cell::new(format!("{} pts", r.cost)),
            Cell::new(if available { "yes" } else { "no" })
                .fg(if available { Color::Green } else { Color::Grey }),
        ]);
    }
    println!("{table}");
    println!("Your points: {}", total);
}

/// Spends points on a catalog reward (by name) or on a raw cost.
pub fn cmd_redeem(reward: String, silent: bool) {
    let (name, cost) = match find_reward(&reward) {
        Some(r) => (r.name.to_string(), r.cost),
        None => match reward.trim().parse::<i64>() {
            Ok(cost) if cost > 0 => (format!("{} points", cost), cost),
            _ => {
                if !silent { eprintln!("Unknown reward '{}'. Run `planust rewards` to see the catalog.", reward); }
                return;
            }
        },
    };

    let mut schedule = load_schedule();
    if !schedule.redeem(cost) {
        if !silent { println!("Not enough points for {} ({} needed, {} available).", name, cost, schedule.total_points()); }
        return;
    }
    if persist(&schedule, silent) && !silent {
        println!("Enjoy your {}! Points left: {}", name, schedule.total_points());
    }
}

/// Asks the model for a timetable and installs it.
///
/// Daily mode replaces one day's tasks; weekly mode replaces the whole week.
/// Nothing is saved when generation fails.
pub fn cmd_plan(goal: String, mode: PlanMode, client: &dyn LlmClient, silent: bool) {
    let mut schedule = load_schedule();
    match plan_into(&mut schedule, client, &goal, mode) {
        Ok(count) => {
            if persist(&schedule, silent) && !silent {
                match mode {
                    PlanMode::Daily(day) => println!("AI timetable generated: {} tasks for {}.", count, day),
                    PlanMode::Weekly => println!("AI timetable generated: {} tasks across the week.", count),
                }
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "plan generation failed");
            if !silent { eprintln!("{}", e.user_message()); }
        }
    }
}

/// Resets the planner to seven empty days and zero points.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and points? This cannot be undone. [y/N] ");
        if io::stdout().flush().is_err() {
            return;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    let mut schedule = load_schedule();
    schedule.reset();
    if let Err(e) = delete_database() {
        eprintln!("Failed to reset planner: {}", e);
        return;
    }
    if persist(&schedule, false) {
        println!("Planner reset successfully.");
    }
}
