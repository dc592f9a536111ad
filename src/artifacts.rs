//! Recognized artifact files and their parsed models

use crate::error::LintError;
use crate::fs::FileSystem;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const DOCKERFILE: &str = "Dockerfile";
pub const CONFIG_JSON: &str = "config.json";
pub const CONFIG_TEMPLATE: &str = "config.json.template";
pub const MANIFEST: &str = "manifest.json";
pub const SERVICE_TEMPLATE: &str = "service.template";
pub const TMPFILES_TEMPLATE: &str = "tmpfiles.template";

pub const TEMPLATE_SUFFIX: &str = ".template";

/// Files that must be copied into the image under `/exports/`.
pub const EXPORTED_FILES: [&str; 4] = [CONFIG_TEMPLATE, MANIFEST, SERVICE_TEMPLATE, TMPFILES_TEMPLATE];

/// Files watched for uncommitted changes.
pub const TRACKED_FILES: [&str; 6] = [
    DOCKERFILE,
    CONFIG_JSON,
    CONFIG_TEMPLATE,
    MANIFEST,
    SERVICE_TEMPLATE,
    TMPFILES_TEMPLATE,
];

/// Variables the installer always provides, whether or not the manifest
/// declares a default for them.
pub const BUILTIN_VARIABLES: [&str; 8] = [
    "DESTDIR",
    "NAME",
    "EXEC_START",
    "EXEC_STOP",
    "HOST_UID",
    "HOST_GID",
    "RUN_DIRECTORY",
    "STATE_DIRECTORY",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(rename = "defaultValues", default)]
    default_values: Option<BTreeMap<String, Value>>,
}

impl Manifest {
    /// Parse `manifest.json` in `root`, if there is one.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Option<Self>, LintError> {
        let path = root.join(MANIFEST);
        if !fs.is_file(&path) {
            return Ok(None);
        }

        let content = fs
            .read_to_string(&path)
            .map_err(|e| LintError::read(&path, e))?;
        let manifest = serde_json::from_str(&content)
            .map_err(|source| LintError::InvalidJson { path, source })?;
        Ok(Some(manifest))
    }

    /// Default values rendered as substitution strings. Non-string JSON
    /// values are rendered as their JSON text; nulls are skipped.
    pub fn default_values(&self) -> HashMap<String, String> {
        self.default_values
            .iter()
            .flatten()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), rendered))
            })
            .collect()
    }

    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.default_values.iter().flatten().map(|(k, _)| k.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub mounts: Vec<Mount>,
    pub root: Option<Root>,
    pub process: Option<Process>,
    pub linux: Option<Linux>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mount {
    #[serde(rename = "type")]
    pub mount_type: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// `root`, `process` and `linux` keep their scalars as raw JSON so a value
/// of the wrong type is reported by the rules instead of failing the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Root {
    pub path: Option<Value>,
    pub readonly: Option<Value>,
}

impl Root {
    pub fn path_str(&self) -> Option<&str> {
        self.path.as_ref().and_then(Value::as_str)
    }

    /// Only the JSON literal `true` counts; `1` or `"true"` do not.
    pub fn is_readonly(&self) -> bool {
        self.readonly == Some(Value::Bool(true))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Process {
    pub terminal: Option<Value>,
    #[serde(rename = "selinuxLabel")]
    pub selinux_label: Option<Value>,
}

impl Process {
    pub fn wants_terminal(&self) -> bool {
        self.terminal == Some(Value::Bool(true))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Linux {
    #[serde(rename = "selinuxProcessLabel")]
    pub selinux_process_label: Option<Value>,
}

impl Linux {
    /// Any non-null value, whatever its type. serde already maps an explicit
    /// `null` to `None`.
    pub fn has_process_label(&self) -> bool {
        self.selinux_process_label.is_some()
    }
}
