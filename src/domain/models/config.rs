//! Configuration domain model.

use serde::{Deserialize, Serialize};

/// Main configuration structure for Resonator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Iteration engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Iteration engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Delay before the first iteration tick, in milliseconds
    #[serde(default = "default_first_tick_delay_ms")]
    pub first_tick_delay_ms: u64,

    /// Interval between iteration ticks, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of iterations before a run is capped
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Best-combination probability at which a run converges
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,

    /// Seed for the run's random number source. When unset, each run draws
    /// fresh OS entropy; set it to make runs reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_first_tick_delay_ms() -> u64 {
    500
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

const fn default_max_iterations() -> u32 {
    20
}

const fn default_convergence_threshold() -> f64 {
    0.95
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_tick_delay_ms: default_first_tick_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
            seed: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
