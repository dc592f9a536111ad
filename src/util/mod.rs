//! Utility modules: structured logging setup

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
