//! syscontainer-lint - checks a system container build directory
//!
//! A build directory holds a `Dockerfile` plus the files the installer reads
//! from `/exports/` in the image: `config.json.template`, `service.template`,
//! `tmpfiles.template` and `manifest.json`. The linter applies a fixed
//! rulebook to each of them and reports warnings and errors.
//!
//! # Example Usage
//!
//! ```no_run
//! use syscontainer_lint::{Linter, RealFileSystem, Reporter, ColorChoice, OutputFormat};
//! use std::path::Path;
//!
//! let linter = Linter::with_git(Box::new(RealFileSystem::new()));
//! let mut reporter = Reporter::stdout(ColorChoice::Auto, OutputFormat::Human);
//! linter.run(Path::new("./etcd"), &mut reporter)?;
//! std::process::exit(reporter.exit_code());
//! # Ok::<(), syscontainer_lint::LintError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`template`]: `$NAME` / `${NAME}` substitution
//! - [`checks`]: the rule sets, one per artifact
//! - [`report`]: diagnostics and exit status
//! - [`linter`]: check ordering and preprocess mode

pub mod artifacts;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod linter;
pub mod report;
pub mod template;
pub mod util;
pub mod vcs;

pub use config::{ConfigError, LintConfig};
pub use error::LintError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use linter::Linter;
pub use report::{ColorChoice, Diagnostic, OutputFormat, Reporter, Severity};
pub use vcs::{GitVcs, VcsError, VersionControl};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
