//! Dockerfile conventions
//!
//! The file is normalized the way the image builder reads it (comment lines
//! dropped, `\` continuations joined) before any rule is matched.

use super::{Check, LintContext};
use crate::artifacts::{DOCKERFILE, EXPORTED_FILES};
use crate::error::LintError;
use crate::report::Reporter;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const EXPORTS_DIR: &str = "/exports/";
const NODOCS_FLAG: &str = "--setopt=tsflags=nodocs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub keyword: String,
    pub args: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Copy,
    Add,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyInstruction {
    pub kind: CopyKind,
    pub sources: Vec<String>,
    pub destination: String,
}

impl CopyInstruction {
    fn copies(&self, filename: &str) -> bool {
        self.sources
            .iter()
            .any(|src| Path::new(src).file_name().and_then(|n| n.to_str()) == Some(filename))
    }

    fn targets_exports(&self) -> bool {
        self.destination == "/exports" || self.destination == EXPORTS_DIR
    }
}

fn continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\[ \t]*\n").expect("valid regex"))
}

fn instruction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([A-Za-z]+)(?:\s+(.*))?$").expect("valid regex"))
}

fn package_install_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:dnf|yum|microdnf)\b[^;&|]*?\binstall\b").expect("valid regex")
    })
}

/// Drop comment lines and join line continuations.
pub fn normalize(content: &str) -> String {
    let without_comments = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");

    continuation_re()
        .replace_all(&without_comments, " ")
        .into_owned()
}

pub fn parse_instructions(content: &str) -> Vec<Instruction> {
    normalize(content)
        .lines()
        .filter_map(|line| {
            let caps = instruction_re().captures(line)?;
            Some(Instruction {
                keyword: caps[1].to_uppercase(),
                args: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Split `COPY`/`ADD` arguments into sources and destination. Handles both
/// the shell form and the JSON array form; leading `--flag` options are
/// skipped.
pub fn parse_copy(instruction: &Instruction) -> Option<CopyInstruction> {
    let kind = match instruction.keyword.as_str() {
        "COPY" => CopyKind::Copy,
        "ADD" => CopyKind::Add,
        _ => return None,
    };

    let mut rest = instruction.args.trim();
    while rest.starts_with("--") {
        rest = match rest.find(char::is_whitespace) {
            Some(idx) => rest[idx..].trim_start(),
            None => "",
        };
    }

    let mut tokens: Vec<String> = if rest.starts_with('[') {
        serde_json::from_str(rest).ok()?
    } else {
        rest.split_whitespace().map(str::to_string).collect()
    };

    if tokens.len() < 2 {
        return None;
    }
    let destination = tokens.pop()?;

    Some(CopyInstruction {
        kind,
        sources: tokens,
        destination,
    })
}

pub struct DockerfileCheck;

impl DockerfileCheck {
    fn check_maintainer(instructions: &[Instruction], reporter: &mut Reporter) {
        for ins in instructions.iter().filter(|i| i.keyword == "MAINTAINER") {
            reporter.warn(
                DOCKERFILE,
                format!(
                    "MAINTAINER is deprecated, use LABEL maintainer=\"{}\" instead",
                    ins.args
                ),
            );
        }
    }

    fn check_export_destination(copies: &[CopyInstruction], reporter: &mut Reporter) {
        for copy in copies {
            if copy.destination == "/export" || copy.destination == "/export/" {
                reporter.warn(
                    DOCKERFILE,
                    format!(
                        "destination {} should be {}",
                        copy.destination, EXPORTS_DIR
                    ),
                );
            }
        }
    }

    fn check_package_docs(instructions: &[Instruction], reporter: &mut Reporter) {
        for ins in instructions.iter().filter(|i| i.keyword == "RUN") {
            if !package_install_re().is_match(&ins.args) {
                continue;
            }
            if ins.args.contains("tsflags=nodocs") || ins.args.contains("--nodocs") {
                continue;
            }
            reporter.warn(
                DOCKERFILE,
                format!(
                    "package install without {}, add it to reduce the image size",
                    NODOCS_FLAG
                ),
            );
        }
    }

    fn check_exported_files(
        ctx: &LintContext<'_>,
        copies: &[CopyInstruction],
        reporter: &mut Reporter,
    ) {
        for file in EXPORTED_FILES.iter().filter(|f| ctx.has_file(f)) {
            let to_exports: Vec<&CopyInstruction> = copies
                .iter()
                .filter(|c| c.copies(file) && c.targets_exports())
                .collect();

            if to_exports.is_empty() {
                reporter.warn(
                    DOCKERFILE,
                    format!(
                        "{} is present but not copied to {} (expected: COPY {} {})",
                        file, EXPORTS_DIR, file, EXPORTS_DIR
                    ),
                );
                continue;
            }

            if to_exports.iter().any(|c| c.kind == CopyKind::Add) {
                reporter.warn(DOCKERFILE, format!("use COPY instead of ADD for {}", file));
            }
            if to_exports.iter().any(|c| c.destination != EXPORTS_DIR) {
                reporter.warn(
                    DOCKERFILE,
                    format!(
                        "destination for {} should be {} (missing trailing slash)",
                        file, EXPORTS_DIR
                    ),
                );
            }
        }
    }
}

impl Check for DockerfileCheck {
    fn name(&self) -> &'static str {
        "Dockerfile"
    }

    fn run(&self, ctx: &LintContext<'_>, reporter: &mut Reporter) -> Result<(), LintError> {
        let content = ctx.read(DOCKERFILE)?;
        let instructions = parse_instructions(&content);
        let copies: Vec<CopyInstruction> = instructions.iter().filter_map(parse_copy).collect();
        debug!(
            instructions = instructions.len(),
            copies = copies.len(),
            "parsed Dockerfile"
        );

        Self::check_maintainer(&instructions, reporter);
        Self::check_export_destination(&copies, reporter);
        Self::check_package_docs(&instructions, reporter);
        Self::check_exported_files(ctx, &copies, reporter);
        Ok(())
    }
}
