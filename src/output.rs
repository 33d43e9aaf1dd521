//! Human and JSON rendering of plans, reports, and the language table.
use crate::executor::{DirOutcome, ExecutionReport, FileOutcome, RepoOutcome};
use crate::plan::GenerationPlan;
use crate::table::{ConfigTable, Replacement};
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

/// Pretty JSON for any serializable output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output JSON")
}

pub fn render_plan(plan: &GenerationPlan) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} project at {}\n",
        style("plan:").cyan().bold(),
        plan.language.display_name(),
        plan.root.display()
    ));
    for dir in &plan.directories {
        out.push_str(&format!("  mkdir  {}\n", dir.display()));
    }
    for file in &plan.files {
        out.push_str(&format!(
            "  copy   {} -> {}\n",
            file.template.display(),
            file.destination.display()
        ));
    }
    for substitution in &plan.substitutions {
        let first_line = substitution.replacement.lines().next().unwrap_or_default();
        out.push_str(&format!("  subst  {} => {}\n", substitution.marker, first_line));
    }
    if let Some(path) = &plan.repo_init {
        out.push_str(&format!("  git    init {}\n", path.display()));
    }
    out
}

pub fn render_report(report: &ExecutionReport, base: Option<&Path>) -> String {
    let mut out = String::new();
    if report.razed {
        out.push_str(&format!("{}\n", style("Razed existing contents").yellow()));
    }
    for dir in &report.directories {
        if dir.outcome == DirOutcome::Created {
            out.push_str(&format!("Creating path '{}'\n", display(&dir.path, base)));
        }
    }
    for file in &report.files {
        let destination = display(&file.destination, base);
        let line = match file.outcome {
            FileOutcome::Copied => format!("{} {destination}", style("✓").green()),
            FileOutcome::Overwritten => {
                format!("{} {destination} (overwritten)", style("✓").green())
            }
            FileOutcome::Skipped => format!("{} {destination} already exists", style("-").dim()),
        };
        out.push_str(&format!("   {line}\n"));
    }
    match report.repository {
        RepoOutcome::Initialized => {
            out.push_str(&format!("{}\n", style("Initialized git repository").green()));
        }
        RepoOutcome::Skipped => out.push_str("Kept existing git repository\n"),
        RepoOutcome::NotRequested => {}
    }
    out
}

/// Listing of every language with its files, flags, and libraries.
pub fn render_table(table: &ConfigTable) -> String {
    let mut out = String::new();
    for language in table.languages() {
        out.push_str(&format!(
            "{} ({})\n",
            style(language.as_str()).bold(),
            language.display_name()
        ));
        if let Some(spec) = table.spec(language) {
            let files: Vec<&str> = spec.base_files.iter().map(|file| file.destination).collect();
            out.push_str(&format!("  files: {}\n", files.join(", ")));
        }
        let flags: Vec<String> = table
            .flags_for(language)
            .into_iter()
            .filter(|flag| !flag.required)
            .map(|flag| match flag.excludes {
                Some(other) => format!("{} (not with {other})", flag.name),
                None => flag.name.to_string(),
            })
            .collect();
        out.push_str(&format!("  flags: {}\n", flags.join(", ")));
        let libraries: Vec<&str> = table
            .libraries_for(language)
            .into_iter()
            .map(|library| library.name)
            .collect();
        out.push_str(&format!("  libs:  {}\n", libraries.join(", ")));
        let always: Vec<String> = table
            .flags_for(language)
            .into_iter()
            .filter(|flag| flag.required)
            .map(|flag| match flag.replacement {
                Replacement::ProjectName => format!("{} = <name>", flag.marker),
                Replacement::Text(text) => format!("{} = {text}", flag.marker),
            })
            .collect();
        out.push_str(&format!("  always: {}\n", always.join(", ")));
    }
    out
}

fn display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{DirReport, FileReport};
    use std::path::PathBuf;

    #[test]
    fn report_lists_skipped_files() {
        console::set_colors_enabled(false);
        let report = ExecutionReport {
            razed: false,
            directories: vec![DirReport {
                path: PathBuf::from("/w/demo/bin"),
                outcome: DirOutcome::Created,
            }],
            files: vec![FileReport {
                destination: PathBuf::from("/w/demo/source/CMakeLists.txt"),
                outcome: FileOutcome::Skipped,
            }],
            substituted: Vec::new(),
            repository: RepoOutcome::NotRequested,
        };
        let text = render_report(&report, Some(Path::new("/w")));
        assert!(text.contains("Creating path 'demo/bin'"), "{text}");
        assert!(text.contains("demo/source/CMakeLists.txt already exists"), "{text}");
    }

    #[test]
    fn table_listing_names_exclusions() {
        console::set_colors_enabled(false);
        let text = render_table(&ConfigTable::builtin());
        assert!(text.contains("stdcpp11 (not with stdcpp17)"), "{text}");
        assert!(text.contains("boost"));
        assert!(!text.contains("flags: project"));
        assert!(text.contains("files: source/src/main.cpp"), "{text}");
    }
}
