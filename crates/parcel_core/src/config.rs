//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path and logging settings for process entry points.
//!
//! # Invariants
//! - Resolution never touches the filesystem.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PARCEL_TRACKER_DB";
pub const LOG_LEVEL_ENV: &str = "PARCEL_TRACKER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PARCEL_TRACKER_LOG_DIR";

const DEFAULT_DB_PATH: &str = "tracker.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "{DB_PATH_ENV} cannot be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by the CLI and any other process wiring the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: String,
    /// Rolling log directory. File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset, except for the database path which
    /// must not be blank when provided.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(db_path) = lookup(DB_PATH_ENV) {
            config.db_path = parse_db_path(&db_path)?;
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|value| !value.trim().is_empty()) {
            config.log_level = normalize_level(&level)
                .map_err(ConfigError::InvalidLogLevel)?
                .to_string();
        }

        if let Some(log_dir) = lookup(LOG_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            config.log_dir = Some(parse_log_dir(&log_dir)?);
        }

        Ok(config)
    }
}

fn parse_db_path(value: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyDbPath);
    }
    Ok(PathBuf::from(trimmed))
}

fn parse_log_dir(value: &str) -> Result<PathBuf, ConfigError> {
    let path = PathBuf::from(value.trim());
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(path));
    }
    Ok(path)
}
