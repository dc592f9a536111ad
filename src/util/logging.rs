//! Structured logging setup
//!
//! Logs go to stderr through `tracing-subscriber`; stdout carries only the
//! lint report or the preprocessed template. `RUST_LOG` overrides the
//! configured level when it is set.
//!
//! # Example
//!
//! ```no_run
//! use syscontainer_lint::util::{init_logging, LoggingConfig};
//! use syscontainer_lint::OutputFormat;
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::new(Level::DEBUG, OutputFormat::Human));
//! tracing::debug!(path = "/srv/etcd", "linting");
//! ```

use crate::report::OutputFormat;
use std::env;
use std::str::FromStr;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const CRATE_TARGET: &str = "syscontainer_lint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,

    /// Emit log records as JSON lines. Follows `--format json` so a machine
    /// consumer sees one format on both streams.
    pub json: bool,

    /// Show `syscontainer_lint::checks::…` targets. Only useful when
    /// debugging the check order.
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(Level::WARN, OutputFormat::Human)
    }
}

impl LoggingConfig {
    pub fn new(level: Level, format: OutputFormat) -> Self {
        Self {
            level,
            json: format == OutputFormat::Json,
            show_target: level >= Level::DEBUG,
        }
    }
}

/// Case-insensitive level name. Unknown names fall back to WARN with a
/// notice on stderr.
///
/// ```
/// use syscontainer_lint::util::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("chatty"), Level::WARN);
/// ```
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or_else(|_| {
        eprintln!(
            "Unknown log level '{}', using warn (expected one of trace, debug, info, warn, error)",
            name
        );
        Level::WARN
    })
}

fn filter_for(level: Level) -> EnvFilter {
    if env::var_os("RUST_LOG").is_some() {
        return EnvFilter::from_default_env();
    }
    format!("{}={}", CRATE_TARGET, level)
        .parse()
        .map(|directive| EnvFilter::default().add_directive(directive))
        .unwrap_or_default()
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let layer = fmt::layer()
            .with_target(config.show_target)
            .with_writer(std::io::stderr);
        let registry = tracing_subscriber::registry().with(filter_for(config.level));

        if config.json {
            registry.with(layer.json()).init();
        } else {
            registry.with(layer).init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        for (name, level) in [
            ("trace", Level::TRACE),
            ("Debug", Level::DEBUG),
            ("INFO", Level::INFO),
            ("warn", Level::WARN),
            (" error ", Level::ERROR),
        ] {
            assert_eq!(parse_level(name), level, "{}", name);
        }
    }

    #[test]
    fn test_parse_level_fallback() {
        assert_eq!(parse_level("loud"), Level::WARN);
        assert_eq!(parse_level(""), Level::WARN);
    }

    #[test]
    fn test_json_follows_output_format() {
        assert!(!LoggingConfig::new(Level::WARN, OutputFormat::Human).json);
        assert!(LoggingConfig::new(Level::WARN, OutputFormat::Json).json);
    }

    #[test]
    fn test_targets_only_when_debugging() {
        assert!(!LoggingConfig::default().show_target);
        assert!(!LoggingConfig::new(Level::INFO, OutputFormat::Human).show_target);
        assert!(LoggingConfig::new(Level::DEBUG, OutputFormat::Human).show_target);
        assert!(LoggingConfig::new(Level::TRACE, OutputFormat::Json).show_target);
    }
}
