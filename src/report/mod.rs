//! Diagnostic collection and the pass/fail contract
//!
//! Every check reports through a [`Reporter`]. Warnings suppress the final
//! success line; errors additionally make the process exit non-zero.

mod diagnostic;
mod reporter;

pub use diagnostic::{Diagnostic, Note, Severity};
pub use reporter::{format_line, ColorChoice, OutputFormat, Reporter, RunState, SUCCESS_MESSAGE};
