//! CLI argument parsing for the project bootstrapper.
//!
//! The CLI only collects arguments; merging with configuration and validation
//! happen in the workflow.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "pmaker",
    version,
    about = "Bootstrap a C or C++ project tree",
    after_help = "Examples:\n  pmaker demo cpp --flags stdcpp11,warnings --libs boost --git\n  pmaker tool c --path ~/src/tool --use-build-generator\n  pmaker demo cpp --dry-run --json\n  pmaker --list"
)]
pub struct RootArgs {
    /// Project name (also the default destination directory)
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// Project language (see --list)
    #[arg(required_unless_present = "list")]
    pub language: Option<String>,

    /// Destination root (defaults to NAME)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Libraries to inject, comma-separated
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub libs: Vec<String>,

    /// Compiler flag rules to activate, comma-separated
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub flags: Vec<String>,

    /// Initialize a git repository after generation
    #[arg(long)]
    pub git: bool,

    /// Remove all contents of the destination root first (asks first)
    #[arg(long)]
    pub clean: bool,

    /// Install the build-generator script under projects/
    #[arg(long)]
    pub use_build_generator: bool,

    /// Install the starter header/implementation pair
    #[arg(long)]
    pub extras: bool,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print the plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Template root (overrides PMAKER_TEMPLATES and the config file)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Config file (overrides PMAKER_CONFIG and the default location)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List languages, flags, and libraries, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "clean", "git"])]
    pub list: bool,

    /// Log debug detail to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_lists() {
        let args = RootArgs::try_parse_from([
            "pmaker",
            "demo",
            "cpp",
            "--flags",
            "stdcpp11,warnings",
            "--flags",
            "werror",
            "--libs",
            "boost",
        ])
        .expect("parse");
        assert_eq!(args.name.as_deref(), Some("demo"));
        assert_eq!(args.language.as_deref(), Some("cpp"));
        assert_eq!(args.flags, vec!["stdcpp11", "warnings", "werror"]);
        assert_eq!(args.libs, vec!["boost"]);
        assert!(!args.git);
    }

    #[test]
    fn name_and_language_required_unless_listing() {
        assert!(RootArgs::try_parse_from(["pmaker", "demo"]).is_err());
        let args = RootArgs::try_parse_from(["pmaker", "--list"]).expect("parse");
        assert!(args.list);
        assert!(args.name.is_none());
    }
}
