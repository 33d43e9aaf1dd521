//! Scaffold execution.
//!
//! Runs a `GenerationPlan` against the filesystem in five strict steps: clean,
//! directories, files, substitution, repository. A failing step aborts the
//! rest; completed steps are not rolled back.
use crate::error::{Result, ScaffoldError};
use crate::plan::{GenerationPlan, GenerationRequest};
use crate::prompt::Confirmer;
use crate::repo::RepoInitializer;
use crate::substitute::substitute;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirOutcome {
    Created,
    Existing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    Copied,
    Overwritten,
    /// Destination already existed and was kept.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoOutcome {
    NotRequested,
    Initialized,
    /// An existing repository was kept.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirReport {
    pub path: PathBuf,
    pub outcome: DirOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub destination: PathBuf,
    pub outcome: FileOutcome,
}

/// What an execution did, step by step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub razed: bool,
    pub directories: Vec<DirReport>,
    pub files: Vec<FileReport>,
    pub substituted: Vec<PathBuf>,
    pub repository: RepoOutcome,
}

impl ExecutionReport {
    fn new() -> Self {
        Self {
            razed: false,
            directories: Vec::new(),
            files: Vec::new(),
            substituted: Vec::new(),
            repository: RepoOutcome::NotRequested,
        }
    }

    fn written(&self, destination: &Path) -> bool {
        self.files.iter().any(|file| {
            file.destination == destination && file.outcome != FileOutcome::Skipped
        })
    }
}

pub struct Executor<'a> {
    confirmer: &'a mut dyn Confirmer,
    repo: &'a dyn RepoInitializer,
}

impl<'a> Executor<'a> {
    pub fn new(confirmer: &'a mut dyn Confirmer, repo: &'a dyn RepoInitializer) -> Self {
        Self { confirmer, repo }
    }

    pub fn execute(
        &mut self,
        plan: &GenerationPlan,
        request: &GenerationRequest,
    ) -> Result<ExecutionReport> {
        let mut report = ExecutionReport::new();
        if request.clean {
            report.razed = self.clean(&plan.root)?;
        }
        report.directories = create_directories(&plan.directories)?;
        self.copy_files(plan, &mut report)?;
        apply_substitutions(plan, &mut report)?;
        if let Some(path) = &plan.repo_init {
            report.repository = self.init_repository(path)?;
        }
        Ok(report)
    }

    fn clean(&mut self, root: &Path) -> Result<bool> {
        if !root.is_dir() {
            return Ok(false);
        }
        let question = format!("Remove all contents of {}?", root.display());
        if !self.confirmer.confirm(&question, false)? {
            tracing::info!(root = %root.display(), "clean declined");
            return Ok(false);
        }
        raze_contents(root)?;
        Ok(true)
    }

    fn copy_files(&mut self, plan: &GenerationPlan, report: &mut ExecutionReport) -> Result<()> {
        for file in &plan.files {
            let existed = file.destination.exists();
            if existed {
                let question = format!("{} already exists. Overwrite?", file.destination.display());
                if !self.confirmer.confirm(&question, false)? {
                    tracing::info!(destination = %file.destination.display(), "already exists");
                    report.files.push(FileReport {
                        destination: file.destination.clone(),
                        outcome: FileOutcome::Skipped,
                    });
                    continue;
                }
            }
            copy_template(&file.template, &file.destination)?;
            if file.executable {
                mark_executable(&file.destination)?;
            }
            report.files.push(FileReport {
                destination: file.destination.clone(),
                outcome: if existed {
                    FileOutcome::Overwritten
                } else {
                    FileOutcome::Copied
                },
            });
        }
        Ok(())
    }

    fn init_repository(&mut self, path: &Path) -> Result<RepoOutcome> {
        if path.join(".git").exists() {
            let question = format!(
                "A repository already exists at {}. Reinitialize?",
                path.display()
            );
            if !self.confirmer.confirm(&question, false)? {
                return Ok(RepoOutcome::Skipped);
            }
        }
        self.repo.init(path)?;
        Ok(RepoOutcome::Initialized)
    }
}

/// Remove every file, then every subdirectory, under `root`. `root` stays.
pub fn raze_contents(root: &Path) -> Result<()> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(|err| ScaffoldError::io("read", root, err))? {
        let entry = entry.map_err(|err| ScaffoldError::io("read", root, err))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|err| ScaffoldError::io("inspect", &path, err))?;
        if file_type.is_dir() {
            dirs.push(path);
        } else {
            fs::remove_file(&path).map_err(|err| ScaffoldError::io("remove", &path, err))?;
        }
    }
    for dir in dirs {
        fs::remove_dir_all(&dir).map_err(|err| ScaffoldError::io("remove", &dir, err))?;
    }
    tracing::info!(root = %root.display(), "razed");
    Ok(())
}

/// Create each missing directory in order. Existing ones are left alone.
pub fn create_directories(directories: &[PathBuf]) -> Result<Vec<DirReport>> {
    let mut reports = Vec::with_capacity(directories.len());
    for dir in directories {
        let outcome = if dir.is_dir() {
            DirOutcome::Existing
        } else {
            fs::create_dir_all(dir).map_err(|err| ScaffoldError::io("create", dir, err))?;
            tracing::debug!(path = %dir.display(), "created directory");
            DirOutcome::Created
        };
        reports.push(DirReport {
            path: dir.clone(),
            outcome,
        });
    }
    Ok(reports)
}

fn copy_template(template: &Path, destination: &Path) -> Result<()> {
    match fs::copy(template, destination) {
        Ok(bytes) => {
            tracing::debug!(
                template = %template.display(),
                destination = %destination.display(),
                bytes,
                "copied template"
            );
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !template.is_file() => {
            Err(ScaffoldError::MissingTemplate {
                path: template.to_path_buf(),
            })
        }
        Err(err) => Err(ScaffoldError::io("copy", destination, err)),
    }
}

fn mark_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .map_err(|err| ScaffoldError::io("inspect", path, err))?
            .permissions();
        perms.set_mode(perms.mode() | 0o755);
        fs::set_permissions(path, perms)
            .map_err(|err| ScaffoldError::io("set permissions on", path, err))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Rewrite markers in every substitution target written during this run.
fn apply_substitutions(plan: &GenerationPlan, report: &mut ExecutionReport) -> Result<()> {
    for target in plan.substitution_targets() {
        if !report.written(target) {
            continue;
        }
        let text =
            fs::read_to_string(target).map_err(|err| ScaffoldError::io("read", target, err))?;
        let rewritten = substitute(&text, &plan.substitutions);
        if rewritten != text {
            fs::write(target, rewritten.as_bytes())
                .map_err(|err| ScaffoldError::io("write", target, err))?;
        }
        report.substituted.push(target.clone());
    }
    Ok(())
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
