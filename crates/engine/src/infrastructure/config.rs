//! Runtime configuration from environment variables.

use std::path::PathBuf;

use nimbleforge_domain::{StepRules, DEFAULT_SKILL_POINT_BUDGET};

use crate::infrastructure::persistence::JsonFileKeyValueStore;

pub const STORAGE_PATH_VAR: &str = "NIMBLEFORGE_STORAGE_PATH";
pub const CATALOG_PATH_VAR: &str = "NIMBLEFORGE_CATALOG_PATH";
pub const SKILL_POINTS_VAR: &str = "NIMBLEFORGE_SKILL_POINTS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file backing the key-value store.
    pub storage_path: PathBuf,
    /// Catalog document to load instead of the built-in data.
    pub catalog_path: Option<PathBuf>,
    pub skill_point_budget: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: JsonFileKeyValueStore::default_path(),
            catalog_path: None,
            skill_point_budget: DEFAULT_SKILL_POINT_BUDGET,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let skill_point_budget = match get(SKILL_POINTS_VAR) {
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: SKILL_POINTS_VAR,
                    value,
                })?,
            None => defaults.skill_point_budget,
        };

        Ok(Self {
            storage_path: get(STORAGE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            catalog_path: get(CATALOG_PATH_VAR).map(PathBuf::from),
            skill_point_budget,
        })
    }

    pub fn step_rules(&self) -> StepRules {
        StepRules {
            skill_point_budget: self.skill_point_budget,
        }
    }
}
