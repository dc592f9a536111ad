use super::{Check, LintContext};
use crate::artifacts::TRACKED_FILES;
use crate::error::LintError;
use crate::report::Reporter;
use crate::vcs::{VcsError, VersionControl};
use tracing::warn;

/// Flags artifacts with unstaged changes, so the image is not built from
/// something that differs from what is committed.
pub struct VcsCheck {
    vcs: Box<dyn VersionControl>,
}

impl VcsCheck {
    pub fn new(vcs: Box<dyn VersionControl>) -> Self {
        Self { vcs }
    }
}

impl Check for VcsCheck {
    fn name(&self) -> &'static str {
        "Vcs"
    }

    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError> {
        for file in TRACKED_FILES.iter().filter(|f| ctx.has_file(f)) {
            match self.vcs.has_uncommitted_changes(ctx.root, file) {
                Ok(true) => reporter.warn(file, "has unstaged changes, commit them before building"),
                Ok(false) => {}
                Err(VcsError::Unavailable(reason)) => {
                    warn!("skipping staleness check: {}", reason);
                    let location = ctx.root.display().to_string();
                    let message = if reason.is_empty() {
                        "version control unavailable, staleness check skipped".to_string()
                    } else {
                        format!("version control unavailable ({}), staleness check skipped", reason)
                    };
                    reporter.note(&location, message);
                    break;
                }
            }
        }
        Ok(())
    }
}
