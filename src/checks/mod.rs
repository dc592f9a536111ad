//! Rule sets applied to the artifacts of a build directory
//!
//! Each [`Check`] owns one artifact (or one concern, for the VCS check) and
//! reports every violation it finds. Checks never stop at the first
//! violation; only fatal preconditions are returned as errors.

pub mod dockerfile;
pub mod manifest;
pub mod runtime_config;
pub mod service;
pub mod vcs;

pub use dockerfile::DockerfileCheck;
pub use manifest::ManifestCheck;
pub use runtime_config::RuntimeConfigCheck;
pub use service::ServiceCheck;
pub use vcs::VcsCheck;

use crate::artifacts::Manifest;
use crate::error::LintError;
use crate::fs::FileSystem;
use crate::report::Reporter;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Everything a check may look at. The manifest is parsed on first use, so
/// checks that never need it still report when it is broken.
pub struct LintContext<'a> {
    pub root: &'a Path,
    pub fs: &'a dyn FileSystem,
    manifest: OnceCell<Option<Manifest>>,
}

impl<'a> LintContext<'a> {
    pub fn new(root: &'a Path, fs: &'a dyn FileSystem) -> Self {
        Self {
            root,
            fs,
            manifest: OnceCell::new(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.fs.is_file(&self.path(name))
    }

    pub fn read(&self, name: &str) -> Result<String, LintError> {
        let path = self.path(name);
        self.fs
            .read_to_string(&path)
            .map_err(|e| LintError::read(path, e))
    }

    /// `manifest.json`, if there is one. Invalid JSON is fatal.
    pub fn manifest(&self) -> Result<Option<&Manifest>, LintError> {
        if let Some(manifest) = self.manifest.get() {
            return Ok(manifest.as_ref());
        }
        let loaded = Manifest::load(self.fs, self.root)?;
        Ok(self.manifest.get_or_init(|| loaded).as_ref())
    }

    /// Manifest default values, empty when there is no manifest.
    pub fn default_values(&self) -> Result<HashMap<String, String>, LintError> {
        Ok(self
            .manifest()?
            .map(Manifest::default_values)
            .unwrap_or_default())
    }
}

pub trait Check {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError>;
}
