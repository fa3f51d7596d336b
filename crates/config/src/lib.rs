//! Configuration for the hotel booking evaluation harness
//!
//! Layered settings (files, then environment with the HOTEL_EVAL prefix),
//! centralized constants, and scenario-file loading.

pub mod constants;
pub mod scenarios;
pub mod settings;
pub mod telemetry;

use thiserror::Error;

pub use scenarios::{load_scenarios, select_scenarios, ScenarioSelection};
pub use settings::{
    load_settings, EvaluationConfig, JudgeConfig, ObservabilityConfig, RuntimeEnvironment, Settings,
};
pub use telemetry::init_logging;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),
}
