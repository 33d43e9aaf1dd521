//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

/// The template tree shipped with the crate.
pub fn shipped_templates() -> PathBuf {
    manifest_dir().join("files")
}

/// Scratch workspace with an empty config file, for running `pmaker`.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{ "schema_version": 1 }"#)?;
        Ok(Self { dir, config })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run the binary inside the workspace with the shipped templates.
    pub fn pmaker(&self, args: &[&str]) -> anyhow::Result<Output> {
        let output = Command::new(env!("CARGO_BIN_EXE_pmaker"))
            .args(args)
            .arg("--templates")
            .arg(shipped_templates())
            .arg("--config")
            .arg(&self.config)
            .current_dir(self.path())
            .env_remove("PMAKER_TEMPLATES")
            .env_remove("PMAKER_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()?;
        Ok(output)
    }
}

/// Check if a binary is available; skip the test if not.
pub fn skip_if_binary_missing(binary: &str) -> bool {
    let missing = Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_err();
    if missing {
        eprintln!("Skipping: {binary} not available");
    }
    missing
}
