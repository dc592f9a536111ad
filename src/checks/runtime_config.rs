use super::{Check, LintContext};
use crate::artifacts::{RuntimeConfig, CONFIG_JSON, CONFIG_TEMPLATE};
use crate::error::LintError;
use crate::report::Reporter;
use crate::template;
use tracing::debug;

pub struct RuntimeConfigCheck;

impl RuntimeConfigCheck {
    fn check_mounts(config: &RuntimeConfig, reporter: &mut Reporter) {
        for (index, mount) in config.mounts.iter().enumerate() {
            if mount.mount_type.as_deref() == Some("rbind") {
                let target = mount
                    .source
                    .as_deref()
                    .or(mount.destination.as_deref())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", index));
                reporter.error(
                    CONFIG_TEMPLATE,
                    format!("mount of {} uses type rbind, use bind instead", target),
                );
            }

            let Some(source) = mount.source.as_deref() else {
                continue;
            };
            if source.starts_with("/var/lib") {
                reporter.warn(
                    CONFIG_TEMPLATE,
                    format!(
                        "mount source {} is under /var/lib, use ${{STATE_DIRECTORY}} instead",
                        source
                    ),
                );
            } else if source.starts_with("/run") {
                reporter.warn(
                    CONFIG_TEMPLATE,
                    format!(
                        "mount source {} is under /run, use ${{RUN_DIRECTORY}} instead",
                        source
                    ),
                );
            }
        }
    }

    fn check_root(config: &RuntimeConfig, reporter: &mut Reporter) {
        let root = config.root.clone().unwrap_or_default();

        if root.path_str() != Some("rootfs") {
            // JSON rendering keeps strings quoted and shows other types as-is.
            let found = root
                .path
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "nothing".to_string());
            reporter.warn(
                CONFIG_TEMPLATE,
                format!("root.path should be \"rootfs\", found {}", found),
            );
        }
        if !root.is_readonly() {
            reporter.error(CONFIG_TEMPLATE, "root.readonly must be true");
        }
    }

    fn check_process(config: &RuntimeConfig, reporter: &mut Reporter) {
        if config.process.as_ref().is_some_and(|p| p.wants_terminal()) {
            reporter.error(CONFIG_TEMPLATE, "process.terminal must be false");
        }

        if config.linux.as_ref().is_some_and(|l| l.has_process_label()) {
            reporter.error(
                CONFIG_TEMPLATE,
                "linux.selinuxProcessLabel is not allowed, set process.selinuxLabel instead",
            );
        }
    }
}

impl Check for RuntimeConfigCheck {
    fn name(&self) -> &'static str {
        "RuntimeConfig"
    }

    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError> {
        if ctx.has_file(CONFIG_JSON) {
            reporter.error(
                CONFIG_JSON,
                format!(
                    "{} is not allowed, rename it to {} so variables can be substituted",
                    CONFIG_JSON, CONFIG_TEMPLATE
                ),
            );
            return Ok(());
        }

        if !ctx.has_file(CONFIG_TEMPLATE) {
            reporter.warn(
                CONFIG_TEMPLATE,
                "not found, the default runtime configuration will be used",
            );
            return Ok(());
        }

        let raw = ctx.read(CONFIG_TEMPLATE)?;
        let content = template::substitute(&raw, &ctx.default_values()?);
        let config: RuntimeConfig =
            serde_json::from_str(&content).map_err(|source| LintError::InvalidJson {
                path: ctx.path(CONFIG_TEMPLATE),
                source,
            })?;
        debug!(mounts = config.mounts.len(), "parsed runtime config");

        Self::check_mounts(&config, reporter);
        Self::check_root(&config, reporter);
        Self::check_process(&config, reporter);
        Ok(())
    }
}
