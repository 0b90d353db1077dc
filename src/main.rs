//! # Planust
//!
//! A weekly planner for the terminal with points and rewards. Tasks live in seven
//! fixed weekdays, completing a task earns its points, and points buy rewards.
//! An optional AI planner turns a plain-language description of your goals into
//! a timetable for one day or the whole week.
//!
//! ## Usage
//!
//! **Adding and completing tasks**
//! ```bash
//! # Add to today, random 5-19 points
//! planust add "Read two chapters"
//!
//! # Add to a given day with a time slot and a fixed value
//! planust add "Gym" --day monday --start 07:00 --end 08:00 --points 8
//!
//! # Show the week (or one day)
//! planust list
//! planust list --day friday
//!
//! # Complete / reopen, using the id prefix shown by `list`
//! planust toggle 3f2a9c1b
//!
//! # Change a task's point value
//! planust points 3f2a 12
//! ```
//!
//! **Rewards**
//! ```bash
//! planust rewards
//! planust redeem "Ice Cream"
//! ```
//!
//! **AI timetable**
//! ```bash
//! # Replace today's tasks
//! planust plan "study 3 hours, workout in the morning, relax in the evening"
//!
//! # Replace the whole week
//! planust plan "gym three times a week, piano practice daily" --weekly
//!
//! # Show the prompt without calling the model
//! planust plan "..." --day sunday --dry-run
//! ```
//!
//! The planner needs an API key in `GEMINI_API_KEY` (a `.env` file in the current
//! directory is read too). `PLANUST_MODEL`, `PLANUST_ENDPOINT` and
//! `PLANUST_TIMEOUT_SECS` tune the request.
//!
//! ## Data Storage
//!
//! The planner is saved in your local data directory:
//! *   Linux: `~/.local/share/planust/planner.json`
//! *   macOS: `~/Library/Application Support/planust/planner.json`
//! *   Windows: `%APPDATA%\planust\planner.json`
//!
//! You can override this by setting the `PLANUST_DB` environment variable.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing_subscriber::EnvFilter;

use planust::commands::*;
use planust::config::Config;
use planust::models::Weekday;
use planust::planner::client::GeminiClient;
use planust::planner::prompt::build_prompt;
use planust::planner::PlanMode;

#[derive(Parser)]
#[command(name = "planust")]
#[command(about = "Weekly planner with points, rewards and an AI timetable generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text (quoted if it has spaces)
        text: String,
        /// Day to add it to (defaults to today)
        #[arg(short, long, value_enum)]
        day: Option<Weekday>,
        /// Point value (defaults to a random 5-19)
        #[arg(short, long)]
        points: Option<u32>,
        /// Start time, HH:MM
        #[arg(short, long)]
        start: Option<String>,
        /// End time, HH:MM
        #[arg(short, long)]
        end: Option<String>,
        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List tasks for the week
    List {
        /// Only show one day
        #[arg(short, long, value_enum)]
        day: Option<Weekday>,
    },
    /// Mark a task done, or reopen it
    Toggle {
        /// Task id or unambiguous prefix
        id: String,
    },
    /// Change a task's point value
    Points {
        /// Task id or unambiguous prefix
        id: String,
        /// New point value
        value: String,
    },
    /// Remove a task
    Remove {
        /// Task id or unambiguous prefix
        id: String,
    },
    /// Show the reward catalog
    Rewards,
    /// Spend points on a reward
    Redeem {
        /// Reward name, or a number of points
        reward: String,
    },
    /// Generate a timetable with the AI planner
    Plan {
        /// Your goals, in plain language
        goal: String,
        /// Plan the whole week instead of a single day
        #[arg(short, long, conflicts_with = "day")]
        weekly: bool,
        /// Day to plan (defaults to today)
        #[arg(short, long, value_enum)]
        day: Option<Weekday>,
        /// Print the prompt instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Reset the planner (delete all tasks and points)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_plan(goal: String, weekly: bool, day: Option<Weekday>, dry_run: bool) {
    let mode = if weekly {
        PlanMode::Weekly
    } else {
        PlanMode::Daily(day.unwrap_or_else(Weekday::today))
    };

    if dry_run {
        println!("{}", build_prompt(&goal, mode));
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return;
        }
    };
    match GeminiClient::from_config(&config) {
        Ok(client) => cmd_plan(goal, mode, &client, false),
        Err(e) => {
            tracing::debug!(error = %e, "cannot build generation client");
            eprintln!("{}", e.user_message());
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { text, day, points, start, end, note }) => cmd_add(text, day, points, start, end, note, false),
        Some(Commands::List { day }) => cmd_list(day),
        Some(Commands::Toggle { id }) => cmd_toggle(id, false),
        Some(Commands::Points { id, value }) => cmd_points(id, value, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Rewards) => cmd_rewards(),
        Some(Commands::Redeem { reward }) => cmd_redeem(reward, false),
        Some(Commands::Plan { goal, weekly, day, dry_run }) => run_plan(goal, weekly, day, dry_run),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "planust", &mut io::stdout());
        }
        None => cmd_list(None),
    }
}
