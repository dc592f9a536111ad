use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// In-memory build directory rooted at `/build` unless told otherwise.
/// Relative paths given to `add_file`/`add_dir` are taken from the root.
pub struct MockFileSystem {
    root: PathBuf,
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/build"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            root,
            nodes: RwLock::new(BTreeMap::new()),
        };
        fs.add_dir(".");
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add (or replace) a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.resolve(path.as_ref());
        let mut nodes = self.nodes.write().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = path.parent() {
            Self::mkdir_p(&mut nodes, parent);
        }
        nodes.insert(path, Node::File(content.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.resolve(path.as_ref());
        let mut nodes = self.nodes.write().unwrap_or_else(|e| e.into_inner());
        Self::mkdir_p(&mut nodes, &path);
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path == Path::new(".") {
            self.root.clone()
        } else if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn mkdir_p(nodes: &mut BTreeMap<PathBuf, Node>, dir: &Path) {
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn node(&self, path: &Path) -> Option<Node> {
        let path = self.resolve(path);
        let nodes = self.nodes.read().unwrap_or_else(|e| e.into_inner());
        nodes.get(&path).cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::File(_)))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.node(path) {
            Some(Node::File(content)) => Ok(content),
            Some(Node::Dir) => bail!("{} is a directory", path.display()),
            None => Err(anyhow!("{} does not exist", path.display())),
        }
    }

    fn file_names(&self, dir: &Path) -> Result<Vec<String>> {
        let dir = self.resolve(dir);
        let nodes = self.nodes.read().unwrap_or_else(|e| e.into_inner());
        if !matches!(nodes.get(&dir), Some(Node::Dir)) {
            bail!("{} is not a directory", dir.display());
        }

        // BTreeMap keys are already in path order.
        Ok(nodes
            .iter()
            .filter(|(path, node)| {
                matches!(node, Node::File(_)) && path.parent() == Some(dir.as_path())
            })
            .filter_map(|(path, _)| path.file_name()?.to_str().map(str::to_string))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_resolve_against_root() {
        let fs = MockFileSystem::new();
        fs.add_file("Dockerfile", "FROM fedora");

        assert!(fs.is_dir(Path::new("/build")));
        assert!(fs.is_file(Path::new("/build/Dockerfile")));
        assert!(fs.is_file(Path::new("Dockerfile")));
        assert_eq!(
            fs.read_to_string(Path::new("/build/Dockerfile")).unwrap(),
            "FROM fedora"
        );
    }

    #[test]
    fn test_read_errors() {
        let fs = MockFileSystem::new();
        fs.add_dir("rootfs");

        assert!(fs.read_to_string(Path::new("/build/manifest.json")).is_err());
        assert!(fs.read_to_string(Path::new("/build/rootfs")).is_err());
    }

    #[test]
    fn test_file_names_skip_directories_and_nested_files() {
        let fs = MockFileSystem::new();
        fs.add_file("tmpfiles.template", "");
        fs.add_file("service.template", "");
        fs.add_file("rootfs/etc/passwd", "");

        assert_eq!(
            fs.file_names(Path::new("/build")).unwrap(),
            vec!["service.template", "tmpfiles.template"]
        );
        assert!(fs.file_names(Path::new("/build/service.template")).is_err());
    }

    #[test]
    fn test_custom_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/srv/etcd"));
        fs.add_file("Dockerfile", "FROM fedora");

        assert_eq!(fs.root(), Path::new("/srv/etcd"));
        assert!(fs.is_dir(Path::new("/srv")));
        assert!(fs.is_file(Path::new("/srv/etcd/Dockerfile")));
    }
}
