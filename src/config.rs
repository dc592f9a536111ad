//! Configuration for syscontainer-lint
//!
//! Settings are loaded from environment variables with sensible defaults;
//! command-line flags override them in `main`.
//!
//! # Environment Variables
//!
//! - `SYSCONTAINER_LINT_PREPROCESS`: print a substituted template instead of
//!   linting (`1|true|yes`) - default: off
//! - `SYSCONTAINER_LINT_LOG_LEVEL`: logging level - default: "warn"
//! - `SYSCONTAINER_LINT_COLOR`: color choice (auto|always|never) - default: "auto"
//! - `NO_COLOR`: disables color when the choice is "auto"

use crate::report::ColorChoice;
use std::env;
use std::fmt;
use thiserror::Error;

pub const PREPROCESS_ENV: &str = "SYSCONTAINER_LINT_PREPROCESS";
pub const LOG_LEVEL_ENV: &str = "SYSCONTAINER_LINT_LOG_LEVEL";
pub const COLOR_ENV: &str = "SYSCONTAINER_LINT_COLOR";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Print the substituted template instead of linting
    pub preprocess: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub color: ColorChoice,
}

impl Default for LintConfig {
    /// Loads from environment variables, falling back to defaults for
    /// missing or unparsable values. Use [`LintConfig::from_env`] to surface
    /// parse errors instead.
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|_| Self {
            preprocess: env_flag(PREPROCESS_ENV),
            log_level: env_log_level(),
            color: ColorChoice::Auto,
        })
    }
}

fn env_log_level() -> String {
    env::var(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
        .to_lowercase()
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl LintConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let preprocess = env_flag(PREPROCESS_ENV);

        let log_level = env_log_level();

        let color = match env::var(COLOR_ENV) {
            Ok(value) => value
                .parse::<ColorChoice>()
                .map_err(|error| ConfigError::ParseError {
                    field: COLOR_ENV.to_string(),
                    error,
                })?,
            Err(_) => ColorChoice::Auto,
        };

        Ok(Self {
            preprocess,
            log_level,
            color,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }
}

impl fmt::Display for LintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "syscontainer-lint configuration:")?;
        writeln!(f, "  Preprocess: {}", self.preprocess)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Color: {:?}", self.color)?;
        Ok(())
    }
}
