//! AI timetable generation.
//!
//! A request flows through `prompt` → model (`client`) → `extract` →
//! `validate` → `merge`. Any failure is returned as a `PlanError` before the
//! schedule is touched, so a rejected reply never leaves a half-applied week.

pub mod client;
pub mod extract;
pub mod merge;
pub mod prompt;
pub mod validate;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::models::Weekday;
use crate::schedule::Schedule;
use client::LlmClient;
use validate::{ValidatedTask, ValidationError};

/// What a generation request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Replace one day's tasks.
    Daily(Weekday),
    /// Replace the whole week; every record names its day.
    Weekly,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("No goals were given.")]
    EmptyInput,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("API error: {status}")]
    HttpError { status: u16, body: String },
    #[error("The model returned no content.")]
    EmptyModelOutput,
    #[error("No timetable could be found in the model's reply.")]
    UnparseableOutput,
    #[error("The generated timetable was rejected: {0}")]
    ValidationFailure(#[from] ValidationError),
}

impl PlanError {
    /// True for failures caused by a missing, invalid, or unauthorised API key.
    pub fn is_credential_error(&self) -> bool {
        match self {
            PlanError::Config(_) => true,
            PlanError::HttpError { status: 401 | 403, .. } => true,
            PlanError::HttpError { status: 400, body } => {
                let body = body.to_ascii_lowercase();
                body.contains("api key") || body.contains("api_key")
            }
            _ => false,
        }
    }

    /// Copy to show the user.
    pub fn user_message(&self) -> &'static str {
        if self.is_credential_error() {
            "The planning service did not accept the API key. Set a valid GEMINI_API_KEY and try again."
        } else if matches!(self, PlanError::NetworkFailure(_)) {
            "Couldn't reach the planning service. Check your connection and try again."
        } else {
            "Couldn't build a timetable from that. Please refine your request and try again."
        }
    }
}

/// Asks the model for a plan and returns the validated records.
pub fn generate_plan(
    client: &dyn LlmClient,
    goal: &str,
    mode: PlanMode,
) -> Result<Vec<ValidatedTask>, PlanError> {
    if goal.trim().is_empty() {
        return Err(PlanError::EmptyInput);
    }
    let reply = client.generate(&prompt::build_prompt(goal, mode))?;
    if reply.trim().is_empty() {
        return Err(PlanError::EmptyModelOutput);
    }
    let raw = extract::extract_tasks(&reply);
    if raw.is_empty() {
        warn!(reply_len = reply.len(), "no timetable found in reply");
        return Err(PlanError::UnparseableOutput);
    }
    validate::validate_batch(&raw, mode).map_err(|e| {
        warn!(error = %e, "timetable rejected");
        PlanError::from(e)
    })
}

/// Installs a validated batch into the schedule. The points total is left as is.
pub fn apply_plan(schedule: &mut Schedule, mode: PlanMode, batch: &[ValidatedTask]) {
    let merged = merge::merge(mode, batch, schedule.days());
    schedule.replace_week(merged);
    info!(?mode, tasks = batch.len(), "plan applied");
}

/// Runs the whole pipeline against a schedule. Returns the number of tasks
/// installed; on error the schedule is unchanged.
pub fn plan_into(
    schedule: &mut Schedule,
    client: &dyn LlmClient,
    goal: &str,
    mode: PlanMode,
) -> Result<usize, PlanError> {
    let batch = generate_plan(client, goal, mode)?;
    apply_plan(schedule, mode, &batch);
    Ok(batch.len())
}
