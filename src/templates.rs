//! Access to the read-only template asset tree.
//!
//! Templates are addressed by paths relative to a template root. The root is
//! resolved once by the driver; nothing in this crate writes under it.
use crate::error::{Result, ScaffoldError};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the template root.
pub const TEMPLATES_ENV: &str = "PMAKER_TEMPLATES";
/// Directory name of the template tree next to the binary or crate.
pub const TEMPLATES_DIR_NAME: &str = "files";

/// Read access to template text fragments.
pub trait TemplateSource {
    /// Absolute path of a template, for byte-for-byte copies.
    fn path(&self, rel: &str) -> PathBuf;

    /// Load a template as text.
    fn read_text(&self, rel: &str) -> Result<String>;
}

/// Templates stored under a directory on disk.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl TemplateSource for DirTemplates {
    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn read_text(&self, rel: &str) -> Result<String> {
        let path = self.path(rel);
        fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ScaffoldError::MissingTemplate { path },
            _ => ScaffoldError::io("read template", path, err),
        })
    }
}

/// Pick the template root from, in order: the explicit override, the
/// `PMAKER_TEMPLATES` variable, the config file, the binary's directory, and
/// the crate's manifest directory. The first existing directory wins.
pub fn resolve_template_root(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return existing_dir(path.to_path_buf());
    }
    if let Some(value) = env::var_os(TEMPLATES_ENV).filter(|value| !value.is_empty()) {
        return existing_dir(PathBuf::from(value));
    }
    if let Some(path) = configured {
        return existing_dir(path.to_path_buf());
    }

    let mut candidates = Vec::new();
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(TEMPLATES_DIR_NAME));
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR_NAME));

    for candidate in &candidates {
        if candidate.is_dir() {
            tracing::debug!(root = %candidate.display(), "using template root");
            return Ok(candidate.clone());
        }
    }
    Err(ScaffoldError::MissingTemplate {
        path: candidates
            .pop()
            .unwrap_or_else(|| PathBuf::from(TEMPLATES_DIR_NAME)),
    })
}

fn existing_dir(path: PathBuf) -> Result<PathBuf> {
    if path.is_dir() {
        tracing::debug!(root = %path.display(), "using template root");
        Ok(path)
    } else {
        Err(ScaffoldError::MissingTemplate { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fragment_reports_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let templates = DirTemplates::new(dir.path().to_path_buf());
        match templates.read_text("libs/none.cmake") {
            Err(ScaffoldError::MissingTemplate { path }) => {
                assert_eq!(path, dir.path().join("libs/none.cmake"));
            }
            other => panic!("expected missing template, got {other:?}"),
        }
    }

    #[test]
    fn explicit_root_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = resolve_template_root(Some(dir.path()), None).expect("existing root");
        assert_eq!(root, dir.path());
        let missing = dir.path().join("nope");
        assert!(resolve_template_root(Some(&missing), None).is_err());
    }

    #[test]
    fn shipped_templates_are_found() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR_NAME);
        let templates = DirTemplates::new(root);
        let text = templates
            .read_text("CMakeLists.txt")
            .expect("shipped CMakeLists template");
        assert!(text.contains("#PM_PROJECT_NAME#"));
    }
}
