//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Values that are present but unparsable are errors, never defaults.

use crate::interaction::gesture::{ActivationConstraint, DEFAULT_ACTIVATION_DISTANCE};
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TRIPBOARD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TRIPBOARD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TRIPBOARD_LOG_DIR";
pub const DRAG_ACTIVATION_DISTANCE_ENV: &str = "TRIPBOARD_DRAG_ACTIVATION_DISTANCE";

const DEFAULT_DB_FILE_NAME: &str = "tripboard.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    NegativeDistance { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a number, got `{value}`")
            }
            Self::NegativeDistance { key, value } => {
                write!(f, "{key} must be zero or positive, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub drag_activation_distance: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            drag_activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let drag_activation_distance = match get(DRAG_ACTIVATION_DISTANCE_ENV) {
            Some(raw) => parse_distance(DRAG_ACTIVATION_DISTANCE_ENV, &raw)?,
            None => defaults.drag_activation_distance,
        };

        Ok(Self {
            db_path: get(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: get(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: get(LOG_DIR_ENV).map(PathBuf::from),
            drag_activation_distance,
        })
    }

    pub fn activation_constraint(&self) -> ActivationConstraint {
        ActivationConstraint {
            activation_distance: self.drag_activation_distance,
        }
    }
}

fn parse_distance(key: &'static str, raw: &str) -> Result<f32, ConfigError> {
    let value: f32 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeDistance {
            key,
            value: raw.to_string(),
        });
    }
    Ok(value)
}
