use super::diagnostic::{Diagnostic, Note, Severity};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub const SUCCESS_MESSAGE: &str = "All Good!";

/// When to color diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
            }
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}'. Valid options: auto, always, never",
                other
            )),
        }
    }
}

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `location: message` line per diagnostic
    #[default]
    Human,
    /// A single JSON document printed at the end of the run
    Json,
}

/// Accumulated run status. `found_error` implies `found_warning`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub found_warning: bool,
    pub found_error: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    warnings: usize,
    errors: usize,
    diagnostics: &'a [Diagnostic],
    notes: &'a [Note],
}

/// Collects diagnostics for one lint run and prints them as they arrive.
pub struct Reporter {
    out: Box<dyn Write>,
    color: bool,
    format: OutputFormat,
    diagnostics: Vec<Diagnostic>,
    notes: Vec<Note>,
    state: RunState,
}

impl Reporter {
    pub fn new(out: Box<dyn Write>, color: bool, format: OutputFormat) -> Self {
        Self {
            out,
            color,
            format,
            diagnostics: Vec::new(),
            notes: Vec::new(),
            state: RunState::default(),
        }
    }

    pub fn stdout(color: ColorChoice, format: OutputFormat) -> Self {
        Self::new(Box::new(io::stdout()), color.enabled(), format)
    }

    /// Reporter that records diagnostics without printing anything.
    pub fn silent() -> Self {
        Self::new(Box::new(io::sink()), false, OutputFormat::Human)
    }

    pub fn emit(&mut self, location: &str, message: impl Into<String>, severity: Severity) {
        self.record(Diagnostic::new(location, message, severity));
    }

    pub fn warn(&mut self, location: &str, message: impl Into<String>) {
        self.emit(location, message, Severity::Warning);
    }

    pub fn error(&mut self, location: &str, message: impl Into<String>) {
        self.emit(location, message, Severity::Error);
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.state.found_warning = true;
        if diagnostic.is_error() {
            self.state.found_error = true;
        }

        if self.format == OutputFormat::Human {
            let line = format_line(&diagnostic, self.color);
            let _ = writeln!(self.out, "{}", line);
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn note(&mut self, location: &str, message: impl Into<String>) {
        let note = Note {
            location: location.to_string(),
            message: message.into(),
        };
        if self.format == OutputFormat::Human {
            let _ = writeln!(self.out, "{}", note);
        }
        self.notes.push(note);
    }

    pub fn summarize(&mut self) {
        match self.format {
            OutputFormat::Human => {
                if !self.state.found_warning {
                    let line = if self.color {
                        format!("{}{}{}", GREEN, SUCCESS_MESSAGE, RESET)
                    } else {
                        SUCCESS_MESSAGE.to_string()
                    };
                    let _ = writeln!(self.out, "{}", line);
                }
            }
            OutputFormat::Json => {
                let report = JsonReport {
                    ok: !self.state.found_warning,
                    warnings: self.count(Severity::Warning),
                    errors: self.count(Severity::Error),
                    diagnostics: &self.diagnostics,
                    notes: &self.notes,
                };
                if let Ok(json) = serde_json::to_string_pretty(&report) {
                    let _ = writeln!(self.out, "{}", json);
                }
            }
        }
        let _ = self.out.flush();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.state.found_error {
            1
        } else {
            0
        }
    }
}

pub fn format_line(diagnostic: &Diagnostic, color: bool) -> String {
    if !color {
        return diagnostic.to_string();
    }
    let code = match diagnostic.severity() {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
    };
    format!("{}{}{}", code, diagnostic, RESET)
}
