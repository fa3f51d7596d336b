//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{judge, timeouts};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Per-run evaluation behavior
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// LLM judge transport
    #[serde(default)]
    pub judge: JudgeConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Evaluation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Path to the scenario definitions file
    #[serde(default = "default_scenarios_path")]
    pub scenarios_path: String,

    /// Directory evaluation reports are written to
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Hard ceiling on one scenario call, seconds
    #[serde(default = "default_call_timeout")]
    pub call_timeout_seconds: u64,

    /// Stall detection window, seconds
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_seconds: u64,

    /// Agent silence before a keep-alive prompt, seconds
    #[serde(default = "default_agent_response_timeout")]
    pub agent_response_timeout_seconds: u64,

    /// Keep-alive attempts before giving up on the agent
    #[serde(default = "default_max_keepalive_attempts")]
    pub max_keepalive_attempts: u32,
}

fn default_scenarios_path() -> String {
    "scenarios/scenarios.json".to_string()
}
fn default_results_dir() -> String {
    "results".to_string()
}
fn default_call_timeout() -> u64 {
    timeouts::DEFAULT_CALL_TIMEOUT_SECS
}
fn default_inactivity_timeout() -> u64 {
    timeouts::INACTIVITY_TIMEOUT_SECS
}
fn default_agent_response_timeout() -> u64 {
    timeouts::AGENT_RESPONSE_TIMEOUT_SECS
}
fn default_max_keepalive_attempts() -> u32 {
    timeouts::MAX_KEEPALIVE_ATTEMPTS
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            scenarios_path: default_scenarios_path(),
            results_dir: default_results_dir(),
            call_timeout_seconds: default_call_timeout(),
            inactivity_timeout_seconds: default_inactivity_timeout(),
            agent_response_timeout_seconds: default_agent_response_timeout(),
            max_keepalive_attempts: default_max_keepalive_attempts(),
        }
    }
}

/// LLM judge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Enable the LLM judge for subjective criteria (pattern evaluation is
    /// always the fallback)
    #[serde(default)]
    pub enabled: bool,

    /// Gemini API key (set via HOTEL_EVAL__JUDGE__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Judge model name
    #[serde(default = "default_judge_model")]
    pub model: String,

    /// Request timeout, seconds
    #[serde(default = "default_judge_timeout")]
    pub timeout_seconds: u64,
}

fn default_judge_model() -> String {
    judge::DEFAULT_GEMINI_MODEL.to_string()
}
fn default_judge_timeout() -> u64 {
    judge::REQUEST_TIMEOUT_SECS
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: default_judge_model(),
            timeout_seconds: default_judge_timeout(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.evaluation.call_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "evaluation.call_timeout_seconds".to_string(),
                message: "Call timeout must be at least 1 second".to_string(),
            });
        }

        if self.evaluation.inactivity_timeout_seconds >= self.evaluation.call_timeout_seconds {
            return Err(ConfigError::InvalidValue {
                field: "evaluation.inactivity_timeout_seconds".to_string(),
                message: format!(
                    "Inactivity timeout must be below the call timeout ({})",
                    self.evaluation.call_timeout_seconds
                ),
            });
        }

        if self.evaluation.scenarios_path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "evaluation.scenarios_path".to_string(),
                message: "Scenario path cannot be empty".to_string(),
            });
        }

        // Judge enabled without a key is fatal only in strict environments;
        // development falls back to pattern evaluation with a warning
        if self.judge.enabled && self.judge.api_key.is_none() {
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "judge.api_key".to_string(),
                    message: "API key must be set when the judge is enabled".to_string(),
                });
            }
            tracing::warn!("judge enabled without api key, subjective criteria use patterns only");
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (HOTEL_EVAL_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("HOTEL_EVAL")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.evaluation.call_timeout_seconds, 600);
        assert_eq!(settings.evaluation.max_keepalive_attempts, 3);
        assert!(!settings.judge.enabled);
    }

    #[test]
    fn test_zero_call_timeout_rejected() {
        let mut settings = Settings::default();
        settings.evaluation.call_timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_inactivity_timeout_must_fit_in_call_timeout() {
        let mut settings = Settings::default();
        settings.evaluation.inactivity_timeout_seconds = 900;
        assert!(settings.validate().is_err());

        settings.evaluation.inactivity_timeout_seconds = 45;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_judge_key_required_in_production() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.judge.enabled = true;
        settings.judge.api_key = None;
        assert!(settings.validate().is_err());

        settings.judge.api_key = Some("secret-key".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_judge_without_key_allowed_in_development() {
        let mut settings = Settings::default();
        settings.judge.enabled = true;
        assert!(settings.validate().is_ok());
    }
}
