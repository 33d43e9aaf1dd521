//! Version-control repository initialization.
//!
//! The `git` binary is opaque: only its exit status matters.
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use std::process::Command;
use std::time::Instant;

pub trait RepoInitializer {
    /// Initialize a repository at `path`.
    fn init(&self, path: &Path) -> Result<()>;
}

/// Runs `git init <path>`.
#[derive(Debug, Clone)]
pub struct GitInit {
    program: String,
}

impl Default for GitInit {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitInit {
    /// Use a different program name, looked up on `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RepoInitializer for GitInit {
    fn init(&self, path: &Path) -> Result<()> {
        let binary = which::which(&self.program).map_err(|_| ScaffoldError::ToolMissing {
            tool: self.program.clone(),
        })?;
        let start = Instant::now();
        let output = Command::new(&binary)
            .arg("init")
            .arg(path)
            .output()
            .map_err(|err| ScaffoldError::io("run", &binary, err))?;
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            path = %path.display(),
            status = %output.status,
            "git init complete"
        );
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if let Some(line) = stderr.lines().next().filter(|line| !line.trim().is_empty()) {
                tracing::warn!(stderr = line, "git init failed");
            }
            return Err(ScaffoldError::ToolFailed {
                tool: self.program.clone(),
                status: output.status,
            });
        }
        Ok(())
    }
}
