use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// The build directory on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }

    fn file_names(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))? {
            let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
            // Follows symlinks, so a linked template still counts.
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("rootfs")).unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM fedora\n").unwrap();
        fs::write(dir.path().join("service.template"), "[Service]\n").unwrap();
        dir
    }

    #[test]
    fn test_file_and_dir_checks() {
        let temp = build_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(temp.path()));
        assert!(fs.is_dir(&temp.path().join("rootfs")));
        assert!(fs.is_file(&temp.path().join("Dockerfile")));
        assert!(!fs.is_file(&temp.path().join("config.json")));
    }

    #[test]
    fn test_read_error_names_the_file() {
        let temp = build_dir();
        let err = RealFileSystem::new()
            .read_to_string(&temp.path().join("manifest.json"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("manifest.json"));
    }

    #[test]
    fn test_file_names_sorted_without_directories() {
        let temp = build_dir();
        let names = RealFileSystem::new().file_names(temp.path()).unwrap();
        assert_eq!(names, vec!["Dockerfile", "service.template"]);
    }
}
