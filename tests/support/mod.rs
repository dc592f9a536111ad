//! Shared fixtures for the integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DOCKERFILE: &str = r#"FROM registry.fedoraproject.org/fedora:latest
LABEL maintainer="ops@example.com"

# keep the image small
RUN dnf install -y --setopt=tsflags=nodocs etcd && \
    dnf clean all

COPY config.json.template manifest.json service.template tmpfiles.template /exports/
"#;

pub const CONFIG_TEMPLATE: &str = r#"{
    "ociVersion": "1.0.0",
    "process": {
        "terminal": false,
        "args": ["/usr/bin/etcd", "--data-dir", "/var/lib/etcd", "--name", "$NAME"],
        "selinuxLabel": "system_u:system_r:container_t:s0"
    },
    "root": {"path": "rootfs", "readonly": true},
    "mounts": [
        {"type": "bind", "source": "${STATE_DIRECTORY}/$NAME", "destination": "/var/lib/etcd", "options": ["rbind", "rw"]},
        {"type": "bind", "source": "$RUN_DIRECTORY/$NAME", "destination": "/run/etcd"}
    ]
}
"#;

pub const SERVICE_TEMPLATE: &str = r#"[Unit]
Description=etcd key-value store

[Service]
ExecStart=$EXEC_START
ExecStop=$EXEC_STOP
WorkingDirectory=$DESTDIR

[Install]
WantedBy=multi-user.target
"#;

pub const TMPFILES_TEMPLATE: &str = "d ${STATE_DIRECTORY}/$NAME 0700 ${HOST_UID} ${HOST_GID} - -\n";

pub const MANIFEST: &str = r#"{"version": "1.0", "defaultValues": {"ETCD_PORT": "2379"}}"#;

/// A build directory on disk that is removed when dropped.
pub struct BuildDir {
    dir: TempDir,
}

#[allow(dead_code)]
impl BuildDir {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// A directory that passes every check.
    pub fn complete() -> Self {
        let build = Self::empty();
        build.write("Dockerfile", DOCKERFILE);
        build.write("config.json.template", CONFIG_TEMPLATE);
        build.write("service.template", SERVICE_TEMPLATE);
        build.write("tmpfiles.template", TMPFILES_TEMPLATE);
        build.write("manifest.json", MANIFEST);
        build
    }

    pub fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.dir.path().join(name), content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", name, e));
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
