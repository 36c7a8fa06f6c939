//! File logging setup.
//!
//! The terminal is owned by the UI, so log records go to a file instead.

use std::{env, fs, fs::File, path::PathBuf, str::FromStr};

use directories::ProjectDirs;
use log::LevelFilter;
use simplelog::WriteLogger;

const LOG_FILE: &str = "waypoint.log";
const LEVEL_VAR: &str = "WAYPOINT_LOG";

/// Where the log file lives on this platform.
pub fn log_path() -> PathBuf {
    ProjectDirs::from("", "", "waypoint")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(env::temp_dir)
        .join(LOG_FILE)
}

/// Parse a level name, falling back to `Info`.
fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the file logger. Returns the log file location.
pub fn init() -> color_eyre::Result<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let level = level_from(env::var(LEVEL_VAR).ok().as_deref());
    WriteLogger::init(level, simplelog::Config::default(), File::create(&path)?)?;
    Ok(path)
}
