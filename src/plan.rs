//! Scaffold planning.
//!
//! The planner turns the language table and a request into a
//! `GenerationPlan`. It never writes anything: the only input it reads is the
//! library fragment text, through a `TemplateSource`.
use crate::error::Result;
use crate::language::Language;
use crate::substitute::Substitution;
use crate::table::{ConfigTable, FileGate, FlagRule};
use crate::templates::TemplateSource;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Everything the user asked for, fixed for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub name: String,
    pub language: String,
    /// Project root on disk (defaults to `name`).
    pub root: PathBuf,
    pub flags: BTreeSet<String>,
    pub libraries: BTreeSet<String>,
    pub build_generator: bool,
    pub extras: bool,
    pub git: bool,
    pub clean: bool,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            root: PathBuf::from(&name),
            name,
            language: language.into(),
            ..Self::default()
        }
    }

    fn gate_passes(&self, gate: FileGate) -> bool {
        match gate {
            FileGate::Always => true,
            FileGate::BuildGenerator => self.build_generator,
            FileGate::Extras => self.extras,
        }
    }
}

/// A template copied to a destination under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCopy {
    pub template: PathBuf,
    pub destination: PathBuf,
    /// Rewrite markers after copying.
    pub substitute: bool,
    pub executable: bool,
}

/// A flag the user selected that lost to a mutually exclusive one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedFlag {
    pub name: String,
    pub kept: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub language: Language,
    pub root: PathBuf,
    /// Directories to ensure, project root first.
    pub directories: Vec<PathBuf>,
    pub files: Vec<FileCopy>,
    pub substitutions: Vec<Substitution>,
    /// Where to run `git init`, when requested and configured.
    pub repo_init: Option<PathBuf>,
    pub excluded_flags: Vec<ExcludedFlag>,
    pub unknown_flags: Vec<String>,
    pub unknown_libraries: Vec<String>,
}

impl GenerationPlan {
    /// Destinations whose contents are rewritten after copying.
    pub fn substitution_targets(&self) -> impl Iterator<Item = &PathBuf> {
        self.files
            .iter()
            .filter(|file| file.substitute)
            .map(|file| &file.destination)
    }
}

/// Build the plan for `request`.
pub fn plan(
    table: &ConfigTable,
    request: &GenerationRequest,
    templates: &dyn TemplateSource,
) -> Result<GenerationPlan> {
    let language = table.language(&request.language)?;
    let specs = table.specs_for(language);
    let root = request.root.clone();

    let mut directories = vec![root.clone()];
    for spec in &specs {
        for dir in &spec.directories {
            let path = root.join(dir);
            if !directories.contains(&path) {
                directories.push(path);
            }
        }
    }

    let mut files = Vec::new();
    for spec in &specs {
        for file in &spec.base_files {
            if !request.gate_passes(file.gate) {
                continue;
            }
            files.push(FileCopy {
                template: templates.path(file.template),
                destination: root.join(file.destination),
                substitute: file.substitute,
                executable: file.executable,
            });
        }
    }

    let mut substitutions = Vec::new();
    let mut active: Vec<&FlagRule> = Vec::new();
    let mut excluded_flags = Vec::new();
    for spec in &specs {
        for flag in &spec.flags {
            if !flag.required && !request.flags.contains(flag.name) {
                continue;
            }
            if !flag.required {
                if let Some(kept) = active.iter().find(|other| other.conflicts_with(flag)) {
                    tracing::debug!(flag = flag.name, kept = kept.name, "flag excluded");
                    excluded_flags.push(ExcludedFlag {
                        name: flag.name.to_string(),
                        kept: kept.name.to_string(),
                    });
                    continue;
                }
            }
            substitutions.push(Substitution::new(
                flag.marker,
                flag.replacement.resolve(&request.name),
            ));
            active.push(flag);
        }
        for library in &spec.libraries {
            if !request.libraries.contains(library.name) {
                continue;
            }
            let text = templates.read_text(library.template)?;
            substitutions.push(Substitution::new(
                library.marker,
                text.trim_end_matches(['\r', '\n']),
            ));
        }
    }

    let unknown_flags = request
        .flags
        .iter()
        .filter(|name| {
            !specs
                .iter()
                .any(|spec| spec.flags.iter().any(|flag| flag.name == name.as_str()))
        })
        .cloned()
        .collect();
    let unknown_libraries = request
        .libraries
        .iter()
        .filter(|name| !specs.iter().any(|spec| spec.library(name.as_str()).is_some()))
        .cloned()
        .collect();

    let repo_init = if request.git {
        specs
            .iter()
            .rev()
            .find_map(|spec| spec.repo_init_path)
            .map(|rel| root.join(rel))
    } else {
        None
    };

    Ok(GenerationPlan {
        language,
        root,
        directories,
        files,
        substitutions,
        repo_init,
        excluded_flags,
        unknown_flags,
        unknown_libraries,
    })
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
