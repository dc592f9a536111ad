use std::path::PathBuf;
use thiserror::Error;

/// Fatal preconditions that abort a lint run before (or in the middle of)
/// the checks. These are reported on their own, never as diagnostics.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("build path {0:?} does not exist or is not a directory")]
    PathNotFound(PathBuf),

    #[error("no Dockerfile found in {0:?}")]
    MissingDockerfile(PathBuf),

    #[error("failed to read {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("invalid JSON in {path:?}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing template argument; usage: <build-path> <template-file>")]
    MissingTemplate,
}

impl LintError {
    pub(crate) fn read(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        LintError::Read {
            path: path.into(),
            reason: format!("{:#}", err),
        }
    }
}
