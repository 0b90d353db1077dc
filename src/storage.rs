use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::PlannerState;
use crate::schedule::Schedule;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Returns the path to the planner database file (`planner.json`).
///
/// The path is determined in the following order:
/// 1. `PLANUST_DB` environment variable.
/// 2. `~/.local/share/planust/planner.json` (on Linux).
/// 3. `./planner.json` (fallback).
pub fn db_path() -> PathBuf {
    std::env::var("PLANUST_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("planust");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("planner.json");
        p
    })
}

/// Where a snapshot that failed to parse is moved: the database path with
/// `.bak` appended (`planner.json.bak`).
pub fn backup_path() -> PathBuf {
    let mut p = db_path().into_os_string();
    p.push(".bak");
    PathBuf::from(p)
}

/// Loads the saved snapshot.
///
/// Returns the canonical empty week if the file does not exist or cannot be
/// read or parsed. A file that cannot be parsed is renamed to
/// [`backup_path`] first so the next save does not destroy it.
pub fn load_state() -> PlannerState {
    let path = db_path();
    if !path.exists() {
        return PlannerState::default();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open planner state");
            return PlannerState::default();
        }
    };
    let mut s = String::new();
    if let Err(e) = f.read_to_string(&mut s) {
        warn!(path = %path.display(), error = %e, "cannot read planner state");
        return PlannerState::default();
    }
    drop(f);
    serde_json::from_str(&s).unwrap_or_else(|e| {
        let backup = backup_path();
        match fs::rename(&path, &backup) {
            Ok(()) => warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %e,
                "planner state is corrupt, moved aside and starting fresh"
            ),
            Err(rename_err) => warn!(
                path = %path.display(),
                error = %e,
                rename_error = %rename_err,
                "planner state is corrupt and could not be moved aside, starting fresh"
            ),
        }
        PlannerState::default()
    })
}

/// Loads the saved snapshot straight into a schedule store.
pub fn load_schedule() -> Schedule {
    Schedule::from_state(load_state())
}

/// Writes the complete state, overwriting the existing file.
pub fn save_state(state: &PlannerState) -> Result<(), StorageError> {
    let path = db_path();
    let s = serde_json::to_string_pretty(state)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    debug!(path = %path.display(), "planner state saved");
    Ok(())
}

/// Deletes the planner database file.
pub fn delete_database() -> Result<(), StorageError> {
    let path = db_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
