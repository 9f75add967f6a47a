//! Configuration for the rotaplan scheduling engine.
//!
//! Load annealing parameters, policy constants and scoring weights from
//! TOML files to tune the engine without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use rotaplan_config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [annealing]
//!     max_iterations = 2000
//!     cooling_rate = 0.99
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.annealing.max_iterations, 2000);
//! // Unspecified sections keep their defaults.
//! assert_eq!(config.policy.max_consecutive_work_days, 6);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use rotaplan_config::EngineConfig;
//!
//! let config = EngineConfig::load("engine.toml").unwrap_or_default();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Random seed for reproducible schedules.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent annealing restarts; the best result wins.
    #[serde(default = "defaults::restarts")]
    pub restarts: usize,

    /// Simulated annealing parameters.
    #[serde(default)]
    pub annealing: AnnealingConfig,

    /// Hard-constraint policy constants.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Soft-constraint scoring weights.
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            restarts: defaults::restarts(),
            annealing: AnnealingConfig::default(),
            policy: PolicyConfig::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Sets the annealing iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.annealing.max_iterations = max_iterations;
        self
    }

    /// Replaces the policy constants.
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.annealing.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "annealing.max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.annealing.cooling_rate > 0.0 && self.annealing.cooling_rate < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "annealing.cooling_rate must be in (0, 1), got {}",
                self.annealing.cooling_rate
            )));
        }
        if !(self.annealing.initial_temperature > 0.0)
            || !self.annealing.initial_temperature.is_finite()
        {
            return Err(ConfigError::Invalid(format!(
                "annealing.initial_temperature must be positive and finite, got {}",
                self.annealing.initial_temperature
            )));
        }
        if self.restarts == 0 {
            return Err(ConfigError::Invalid(
                "restarts must be at least 1".to_string(),
            ));
        }
        if self.policy.max_consecutive_work_days == 0 {
            return Err(ConfigError::Invalid(
                "policy.max_consecutive_work_days must be at least 1".to_string(),
            ));
        }
        if self.policy.min_consecutive_rest_days == 0 {
            return Err(ConfigError::Invalid(
                "policy.min_consecutive_rest_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Simulated annealing parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnealingConfig {
    /// Iteration budget for one invocation.
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: u32,

    /// Multiplicative temperature decay applied every iteration.
    #[serde(default = "defaults::cooling_rate")]
    pub cooling_rate: f64,

    /// Starting temperature (higher = more exploration).
    #[serde(default = "defaults::initial_temperature")]
    pub initial_temperature: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
            cooling_rate: defaults::cooling_rate(),
            initial_temperature: defaults::initial_temperature(),
        }
    }
}

/// Hard-constraint policy constants, enforced by repair.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyConfig {
    /// Longest allowed run of working days.
    #[serde(default = "defaults::max_consecutive_work_days")]
    pub max_consecutive_work_days: u32,

    /// Rest days forced after every night shift. Zero disables the rule.
    #[serde(default = "defaults::min_rest_days_after_night")]
    pub min_rest_days_after_night: u32,

    /// Minimum length of any rest block.
    #[serde(default = "defaults::min_consecutive_rest_days")]
    pub min_consecutive_rest_days: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: defaults::max_consecutive_work_days(),
            min_rest_days_after_night: defaults::min_rest_days_after_night(),
            min_consecutive_rest_days: defaults::min_consecutive_rest_days(),
        }
    }
}

/// Soft-constraint scoring weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreWeights {
    /// Weight of the weekend-load balance sub-score.
    #[serde(default = "defaults::weekend_weight")]
    pub weekend: u32,

    /// Weight of the preference-match sub-score.
    #[serde(default = "defaults::preference_weight")]
    pub preference: u32,

    /// Penalty weight per night-then-morning pair.
    #[serde(default = "defaults::night_morning_weight")]
    pub night_morning: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            weekend: defaults::weekend_weight(),
            preference: defaults::preference_weight(),
            night_morning: defaults::night_morning_weight(),
        }
    }
}

mod defaults {
    pub fn restarts() -> usize {
        1
    }
    pub fn max_iterations() -> u32 {
        1000
    }
    pub fn cooling_rate() -> f64 {
        0.995
    }
    pub fn initial_temperature() -> f64 {
        100.0
    }
    pub fn max_consecutive_work_days() -> u32 {
        6
    }
    pub fn min_rest_days_after_night() -> u32 {
        2
    }
    pub fn min_consecutive_rest_days() -> u32 {
        2
    }
    pub fn weekend_weight() -> u32 {
        2
    }
    pub fn preference_weight() -> u32 {
        3
    }
    pub fn night_morning_weight() -> u32 {
        5
    }
}
