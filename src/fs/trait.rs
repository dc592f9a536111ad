use anyhow::Result;
use std::path::Path;

/// Read-only view of a build directory, so the checks can run against an
/// in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Names of the regular files directly inside `dir`, sorted.
    /// Subdirectories are skipped.
    fn file_names(&self, dir: &Path) -> Result<Vec<String>>;
}
