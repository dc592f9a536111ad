//! Runs the checks against a build directory in a fixed order

use crate::artifacts::{Manifest, DOCKERFILE};
use crate::checks::{
    Check, DockerfileCheck, LintContext, ManifestCheck, RuntimeConfigCheck, ServiceCheck,
    VcsCheck,
};
use crate::error::LintError;
use crate::fs::FileSystem;
use crate::report::Reporter;
use crate::template;
use crate::vcs::{GitVcs, VersionControl};
use std::path::Path;
use tracing::{debug, info};

pub struct Linter {
    fs: Box<dyn FileSystem>,
    checks: Vec<Box<dyn Check>>,
}

impl Linter {
    /// Default rulebook: Dockerfile, VCS staleness, runtime config, service
    /// unit, manifest.
    pub fn new(fs: Box<dyn FileSystem>, vcs: Box<dyn VersionControl>) -> Self {
        Self::with_checks(
            fs,
            vec![
                Box::new(DockerfileCheck),
                Box::new(VcsCheck::new(vcs)),
                Box::new(RuntimeConfigCheck),
                Box::new(ServiceCheck),
                Box::new(ManifestCheck),
            ],
        )
    }

    pub fn with_git(fs: Box<dyn FileSystem>) -> Self {
        Self::new(fs, Box::new(GitVcs::new()))
    }

    pub fn with_checks(fs: Box<dyn FileSystem>, checks: Vec<Box<dyn Check>>) -> Self {
        Self { fs, checks }
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Lint `root`, reporting diagnostics as they are found. Returns an
    /// error only for fatal preconditions; rule violations are left in the
    /// reporter.
    pub fn run(&self, root: &Path, reporter: &mut Reporter) -> Result<(), LintError> {
        info!("linting {}", root.display());

        if !self.fs.is_dir(root) {
            return Err(LintError::PathNotFound(root.to_path_buf()));
        }
        if !self.fs.is_file(&root.join(DOCKERFILE)) {
            return Err(LintError::MissingDockerfile(root.to_path_buf()));
        }

        let ctx = LintContext::new(root, self.fs.as_ref());

        for check in &self.checks {
            debug!(check = check.name(), "running check");
            check.run(&ctx, reporter)?;
        }

        reporter.summarize();
        let state = reporter.state();
        info!(
            warnings = state.found_warning,
            errors = state.found_error,
            "lint finished"
        );
        Ok(())
    }

    /// Substitute `template_file` with the manifest defaults of `root`.
    /// Unknown variables are kept for the install-time pass.
    pub fn preprocess(&self, root: &Path, template_file: &Path) -> Result<String, LintError> {
        let values = Manifest::load(self.fs.as_ref(), root)?
            .as_ref()
            .map(Manifest::default_values)
            .unwrap_or_default();

        let content = self
            .fs
            .read_to_string(template_file)
            .map_err(|e| LintError::read(template_file, e))?;
        debug!(
            template = %template_file.display(),
            defaults = values.len(),
            "preprocessing template"
        );
        Ok(template::substitute(&content, &values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::report::Severity;
    use crate::vcs::VcsError;
    use std::path::PathBuf;

    struct CleanVcs;

    impl VersionControl for CleanVcs {
        fn has_uncommitted_changes(&self, _repo: &Path, _filename: &str) -> Result<bool, VcsError> {
            Ok(false)
        }
    }

    const DOCKERFILE_OK: &str = "FROM fedora\nLABEL maintainer=\"ops@example.com\"\nRUN dnf install -y --setopt=tsflags=nodocs etcd && dnf clean all\nCOPY config.json.template manifest.json service.template tmpfiles.template /exports/\n";
    const CONFIG_OK: &str = r#"{"root": {"path": "rootfs", "readonly": true}, "process": {"terminal": false, "args": ["$EXEC_START"]}}"#;
    const SERVICE_OK: &str = "[Service]\nExecStart=$EXEC_START\nExecStop=$EXEC_STOP\nWorkingDirectory=$DESTDIR\n";

    fn complete_build_dir() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("Dockerfile", DOCKERFILE_OK);
        fs.add_file("config.json.template", CONFIG_OK);
        fs.add_file("service.template", SERVICE_OK);
        fs.add_file("tmpfiles.template", "d ${STATE_DIRECTORY}/$NAME 0700 - - - -\n");
        fs.add_file("manifest.json", r#"{"version": "1.0", "defaultValues": {}}"#);
        fs
    }

    fn lint(fs: MockFileSystem) -> (Result<(), LintError>, Reporter) {
        let root = fs.root().to_path_buf();
        let linter = Linter::new(Box::new(fs), Box::new(CleanVcs));
        let mut reporter = Reporter::silent();
        let result = linter.run(&root, &mut reporter);
        (result, reporter)
    }

    #[test]
    fn test_check_order() {
        let linter = Linter::new(Box::new(MockFileSystem::new()), Box::new(CleanVcs));
        assert_eq!(
            linter.check_names(),
            vec!["Dockerfile", "Vcs", "RuntimeConfig", "Service", "Manifest"]
        );
    }

    #[test]
    fn test_complete_directory_is_clean() {
        let (result, reporter) = lint(complete_build_dir());
        assert!(result.is_ok());
        assert!(reporter.diagnostics().is_empty(), "{:?}", reporter.diagnostics());
        assert_eq!(reporter.exit_code(), 0);
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let fs = MockFileSystem::new();
        let linter = Linter::new(Box::new(fs), Box::new(CleanVcs));
        let mut reporter = Reporter::silent();

        let result = linter.run(&PathBuf::from("/nowhere"), &mut reporter);
        assert!(matches!(result, Err(LintError::PathNotFound(_))));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_dockerfile_is_fatal() {
        let (result, reporter) = lint(MockFileSystem::new());
        assert!(matches!(result, Err(LintError::MissingDockerfile(_))));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_invalid_manifest_is_fatal() {
        let fs = complete_build_dir();
        fs.add_file("manifest.json", "{ not json");
        let (result, reporter) = lint(fs);
        assert!(matches!(result, Err(LintError::InvalidJson { .. })));
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_invalid_manifest_keeps_earlier_diagnostics() {
        let fs = complete_build_dir();
        fs.add_file("manifest.json", "{ not json");
        fs.add_file("Dockerfile", "FROM fedora\nMAINTAINER me\n");

        let (result, reporter) = lint(fs);
        assert!(matches!(result, Err(LintError::InvalidJson { .. })));
        assert!(reporter
            .diagnostics()
            .iter()
            .any(|d| d.location() == "Dockerfile" && d.message().contains("MAINTAINER")));
        assert!(reporter
            .diagnostics()
            .iter()
            .all(|d| d.location() == "Dockerfile"));
    }

    #[test]
    fn test_errors_and_warnings_accumulate_across_checks() {
        let fs = complete_build_dir();
        fs.add_file("config.json", "{}");
        fs.add_file("Dockerfile", "FROM fedora\nMAINTAINER me\n");

        let (result, reporter) = lint(fs);
        assert!(result.is_ok());
        assert_eq!(reporter.count(Severity::Error), 1);
        assert!(reporter.count(Severity::Warning) >= 2);
        assert_eq!(reporter.exit_code(), 1);
    }

    #[test]
    fn test_preprocess_uses_manifest_defaults() {
        let fs = complete_build_dir();
        fs.add_file(
            "manifest.json",
            r#"{"defaultValues": {"NAME": "etcd", "PORT": 2379}}"#,
        );
        let root = fs.root().to_path_buf();
        let linter = Linter::new(Box::new(fs), Box::new(CleanVcs));

        let out = linter
            .preprocess(&root, &root.join("tmpfiles.template"))
            .unwrap();
        assert_eq!(out, "d ${STATE_DIRECTORY}/etcd 0700 - - - -\n");
    }

    #[test]
    fn test_preprocess_without_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file("service.template", "ExecStart=$EXEC_START $$HOME");
        let root = fs.root().to_path_buf();
        let linter = Linter::new(Box::new(fs), Box::new(CleanVcs));

        let out = linter
            .preprocess(&root, &root.join("service.template"))
            .unwrap();
        assert_eq!(out, "ExecStart=$EXEC_START $HOME");
    }

    #[test]
    fn test_preprocess_missing_template() {
        let fs = MockFileSystem::new();
        let root = fs.root().to_path_buf();
        let linter = Linter::new(Box::new(fs), Box::new(CleanVcs));

        let result = linter.preprocess(&root, &root.join("missing.template"));
        assert!(matches!(result, Err(LintError::Read { .. })));
    }
}
