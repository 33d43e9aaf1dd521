//! Generation workflow driven by the CLI.
//!
//! validate language -> optional clean -> directories -> files ->
//! substitutions -> repository init.
use crate::cli::RootArgs;
use crate::config::{self, UserConfig};
use crate::executor::Executor;
use crate::output;
use crate::plan::{self, GenerationRequest};
use crate::prompt::{Confirmer, FixedConfirmer, TerminalConfirmer};
use crate::repo::GitInit;
use crate::table::ConfigTable;
use crate::templates::{resolve_template_root, DirTemplates};
use anyhow::{anyhow, Context, Result};
use console::style;
use std::path::PathBuf;

/// Run one CLI invocation.
pub fn run(args: RootArgs) -> Result<()> {
    let table = ConfigTable::builtin();
    table.validate().context("validate built-in language table")?;

    if args.list {
        if args.json {
            println!("{}", output::to_json(&table)?);
        } else {
            print!("{}", output::render_table(&table));
        }
        return Ok(());
    }

    // Reject unknown languages before loading config or touching disk.
    let language = args
        .language
        .as_deref()
        .ok_or_else(|| anyhow!("language is required"))?;
    table.language(language)?;

    let config = config::load_config(args.config.as_deref())?;
    let request = build_request(&args, &config)?;

    let template_root =
        resolve_template_root(args.templates.as_deref(), config.templates_dir.as_deref())?;
    let templates = DirTemplates::new(template_root);
    let plan = plan::plan(&table, &request, &templates)?;

    for name in &plan.unknown_flags {
        tracing::warn!(flag = %name, language = %plan.language, "unknown flag ignored");
    }
    for name in &plan.unknown_libraries {
        tracing::warn!(library = %name, language = %plan.language, "unknown library ignored");
    }
    for excluded in &plan.excluded_flags {
        tracing::warn!(
            flag = %excluded.name,
            kept = %excluded.kept,
            "flag conflicts with an earlier selection and was dropped"
        );
    }

    if args.dry_run {
        if args.json {
            println!("{}", output::to_json(&plan)?);
        } else {
            print!("{}", output::render_plan(&plan));
        }
        return Ok(());
    }

    let mut terminal = TerminalConfirmer;
    let mut assume_yes = FixedConfirmer(true);
    let confirmer: &mut dyn Confirmer = if args.yes {
        &mut assume_yes
    } else {
        &mut terminal
    };
    let git = GitInit::default();

    tracing::info!(
        name = %request.name,
        language = %plan.language,
        root = %request.root.display(),
        "generating project"
    );
    let report = Executor::new(confirmer, &git)
        .execute(&plan, &request)
        .with_context(|| format!("generate {}", request.root.display()))?;

    if args.json {
        println!("{}", output::to_json(&report)?);
    } else {
        let base = request.root.parent().filter(|parent| !parent.as_os_str().is_empty());
        print!("{}", output::render_report(&report, base));
        println!(
            "{} {} project '{}' ready in {}",
            style("✅").green(),
            plan.language.display_name(),
            request.name,
            request.root.display()
        );
    }
    Ok(())
}

/// Merge parsed arguments with configuration defaults into one request.
pub fn build_request(args: &RootArgs, config: &UserConfig) -> Result<GenerationRequest> {
    let name = args
        .name
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("project name must be non-empty"))?;
    // The language id must match the table exactly, so it is not trimmed.
    let language = args
        .language
        .as_deref()
        .ok_or_else(|| anyhow!("language is required"))?;

    let mut request = GenerationRequest::new(name, language);
    request.root = args.path.clone().unwrap_or_else(|| PathBuf::from(name));
    request.flags = config
        .default_flags
        .iter()
        .chain(&args.flags)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    request.libraries = config
        .default_libs
        .iter()
        .chain(&args.libs)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    request.build_generator = args.use_build_generator;
    request.extras = args.extras;
    request.git = args.git || config.git;
    request.clean = args.clean;
    Ok(request)
}
