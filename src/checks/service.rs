use super::{Check, LintContext};
use crate::artifacts::SERVICE_TEMPLATE;
use crate::error::LintError;
use crate::report::Reporter;
use crate::template;
use regex::Regex;
use std::sync::OnceLock;

/// A unit directive and the installer variable that can generate its value.
struct Directive {
    key: &'static str,
    variable: &'static str,
}

const DIRECTIVES: [Directive; 3] = [
    Directive {
        key: "ExecStart",
        variable: "EXEC_START",
    },
    Directive {
        key: "ExecStop",
        variable: "EXEC_STOP",
    },
    Directive {
        key: "WorkingDirectory",
        variable: "DESTDIR",
    },
];

/// First line per key wins. `ExecStartPre=` and friends do not match.
fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(ExecStart|ExecStop|WorkingDirectory)=(.*)$").expect("valid regex")
    })
}

pub struct ServiceCheck;

impl ServiceCheck {
    fn check_directive(content: &str, directive: &Directive, reporter: &mut Reporter) {
        let line = directive_re()
            .captures_iter(content)
            .find(|caps| &caps[1] == directive.key);
        let Some(caps) = line else {
            reporter.warn(SERVICE_TEMPLATE, format!("no {}= line found", directive.key));
            return;
        };

        let value = caps.get(2).map_or("", |m| m.as_str());
        let bare = format!("${}", directive.variable);
        let braced = format!("${{{}}}", directive.variable);
        let uses_variable = template::extract_placeholder_names(value).contains(directive.variable);

        if !uses_variable {
            reporter.warn(
                SERVICE_TEMPLATE,
                format!(
                    "{}={} could be generated automatically using {} (or {})",
                    directive.key,
                    value.trim(),
                    bare,
                    braced
                ),
            );
        }
    }
}

impl Check for ServiceCheck {
    fn name(&self) -> &'static str {
        "Service"
    }

    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError> {
        if !ctx.has_file(SERVICE_TEMPLATE) {
            reporter.warn(
                SERVICE_TEMPLATE,
                "not found, a default systemd unit will be used",
            );
            return Ok(());
        }

        let raw = ctx.read(SERVICE_TEMPLATE)?;
        let content = template::substitute(&raw, &ctx.default_values()?);

        for directive in &DIRECTIVES {
            Self::check_directive(&content, directive, reporter);
        }
        Ok(())
    }
}
