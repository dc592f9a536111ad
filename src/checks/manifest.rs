use super::{Check, LintContext};
use crate::artifacts::{Manifest, BUILTIN_VARIABLES, MANIFEST, TEMPLATE_SUFFIX};
use crate::error::LintError;
use crate::report::Reporter;
use crate::template;
use std::collections::BTreeSet;
use tracing::debug;

/// Every variable used by a template needs a default in the manifest unless
/// the installer provides it.
pub struct ManifestCheck;

impl ManifestCheck {
    fn known_names(manifest: &Manifest) -> BTreeSet<String> {
        let mut known: BTreeSet<String> =
            BUILTIN_VARIABLES.iter().map(|s| s.to_string()).collect();
        known.extend(manifest.declared_names().map(str::to_string));
        known
    }

    fn template_files(ctx: &LintContext<'_>) -> Result<Vec<String>, LintError> {
        let mut names = ctx
            .fs
            .file_names(ctx.root)
            .map_err(|e| LintError::read(ctx.root, e))?;
        names.retain(|name| name.ends_with(TEMPLATE_SUFFIX));
        Ok(names)
    }
}

impl Check for ManifestCheck {
    fn name(&self) -> &'static str {
        "Manifest"
    }

    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError> {
        let Some(manifest) = ctx.manifest()? else {
            reporter.warn(
                MANIFEST,
                "not found, template variables cannot have default values",
            );
            return Ok(());
        };

        let known = Self::known_names(manifest);
        let mut missing = BTreeSet::new();
        for file in Self::template_files(ctx)? {
            let content = ctx.read(&file)?;
            let names = template::extract_placeholder_names(&content);
            debug!(template = %file, variables = names.len(), "scanned template");
            missing.extend(names.into_iter().filter(|n| !known.contains(n)));
        }

        for name in missing {
            reporter.warn(
                MANIFEST,
                format!(
                    "variable {} is used in a template but has no entry in defaultValues",
                    name
                ),
            );
        }
        Ok(())
    }
}
