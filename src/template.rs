//! Placeholder substitution for the `*.template` artifacts
//!
//! Two forms are recognized: `$NAME` and `${NAME}`, where `NAME` matches
//! `[A-Za-z_][A-Za-z0-9_]*`. `$$` is an escaped literal `$`. Substitution is
//! non-strict: names without a value stay in the output untouched, because
//! the templates are substituted a second time when the container is
//! installed.

use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\$(?:(?P<escaped>\$)|(?P<named>[A-Za-z_][A-Za-z0-9_]*)|\{(?P<braced>[A-Za-z_][A-Za-z0-9_]*)\})",
        )
        .expect("valid regex")
    })
}

fn placeholder_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.name("named")
        .or_else(|| caps.name("braced"))
        .map(|m| m.as_str())
}

/// Replace every placeholder whose name is a key of `values`.
pub fn substitute(text: &str, values: &HashMap<String, String>) -> String {
    placeholder_re()
        .replace_all(text, |caps: &Captures<'_>| {
            if caps.name("escaped").is_some() {
                return "$".to_string();
            }
            match placeholder_name(caps).and_then(|name| values.get(name)) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Distinct placeholder names used in `text`, whether or not they resolve.
pub fn extract_placeholder_names(text: &str) -> BTreeSet<String> {
    placeholder_re()
        .captures_iter(text)
        .filter_map(|caps| placeholder_name(&caps).map(str::to_string))
        .collect()
}
