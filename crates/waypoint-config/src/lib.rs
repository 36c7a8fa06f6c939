//! Configuration for the waypoint animation.
//!
//! Reads `config.toml` from the platform config directory. Only the number of
//! markers and the waypoints are configurable; everything missing from the
//! file falls back to the defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypoint_core::PathPoint;

const CONFIG_FILE: &str = "config.toml";

/// Default number of markers.
pub const DEFAULT_OBJECTS: usize = 10;

/// Default closed path.
pub const DEFAULT_PATH: [PathPoint; 6] = [
    PathPoint::new(100.0, 100.0),
    PathPoint::new(500.0, 200.0),
    PathPoint::new(300.0, 400.0),
    PathPoint::new(800.0, 600.0),
    PathPoint::new(100.0, 600.0),
    PathPoint::new(500.0, 400.0),
];

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Animation setup read from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of markers to spawn.
    pub objects: usize,
    /// Waypoints in traversal order.
    pub path: Vec<PathPoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            objects: DEFAULT_OBJECTS,
            path: DEFAULT_PATH.to_vec(),
        }
    }
}

impl Config {
    /// Location of the config file for this platform.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "waypoint")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the config from the platform location, or the defaults if there
    /// is no config file yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "loaded config from {}: {} objects, {} waypoints",
            path.display(),
            config.objects,
            config.path.len()
        );
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(write_err)
    }
}
