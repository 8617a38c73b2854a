//! Configuration management infrastructure
//!
//! Hierarchical configuration for the engine using figment:
//! - YAML file loading (`.resonator/config.yaml` + local overrides)
//! - Environment variable overrides (`RESONATOR_*`)
//! - Configuration validation
//! - Type-safe config structs

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
