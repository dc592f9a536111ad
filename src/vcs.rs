//! Version control seam used by the staleness check

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VcsError {
    #[error("version control unavailable: {0}")]
    Unavailable(String),
}

pub trait VersionControl {
    /// Whether `filename` (relative to `repo`) has unstaged changes.
    fn has_uncommitted_changes(&self, repo: &Path, filename: &str) -> Result<bool, VcsError>;
}

/// Shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitVcs {
    program: String,
}

impl GitVcs {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn git(&self, repo: &Path, args: &[&str]) -> Result<std::process::Output, VcsError> {
        debug!(repo = %repo.display(), ?args, "running {}", self.program);
        Command::new(&self.program)
            .arg("-C")
            .arg(repo)
            .args(args)
            .output()
            .map_err(|e| VcsError::Unavailable(format!("failed to run {}: {}", self.program, e)))
    }
}

impl Default for GitVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitVcs {
    fn has_uncommitted_changes(&self, repo: &Path, filename: &str) -> Result<bool, VcsError> {
        let inside = self.git(repo, &["rev-parse", "--is-inside-work-tree"])?;
        if !inside.status.success() {
            return Err(VcsError::Unavailable(
                String::from_utf8_lossy(&inside.stderr).trim().to_string(),
            ));
        }

        let diff = self.git(repo, &["diff", "--quiet", "--", filename])?;
        match diff.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(VcsError::Unavailable(
                String::from_utf8_lossy(&diff.stderr).trim().to_string(),
            )),
        }
    }
}
