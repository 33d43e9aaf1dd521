//! Static language configuration table.
//!
//! Every language and language group is one `LanguageSpec` record. The table
//! is built once, validated once at startup, and only read afterwards.
use crate::error::{Result, ScaffoldError};
use crate::language::{Language, SpecId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Condition under which a base file is instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileGate {
    Always,
    /// Only with `--use-build-generator`.
    BuildGenerator,
    /// Only with `--extras`.
    Extras,
}

#[derive(Debug, Clone, Serialize)]
pub struct BaseFile {
    /// Path relative to the template root.
    pub template: &'static str,
    /// Path relative to the project root.
    pub destination: &'static str,
    pub gate: FileGate,
    /// Whether markers in the copied file are rewritten.
    pub substitute: bool,
    /// Mark the copy executable (unix only).
    pub executable: bool,
}

/// What a flag rule's marker is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum Replacement {
    Text(&'static str),
    ProjectName,
}

impl Replacement {
    pub fn resolve(&self, project_name: &str) -> String {
        match self {
            Replacement::Text(text) => (*text).to_string(),
            Replacement::ProjectName => project_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagRule {
    pub name: &'static str,
    pub marker: &'static str,
    pub replacement: Replacement,
    /// Name of the flag this one cannot be combined with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excludes: Option<&'static str>,
    /// Applied regardless of the user's selection.
    pub required: bool,
}

impl FlagRule {
    fn optional(name: &'static str, marker: &'static str, text: &'static str) -> Self {
        Self {
            name,
            marker,
            replacement: Replacement::Text(text),
            excludes: None,
            required: false,
        }
    }

    fn required(name: &'static str, marker: &'static str, replacement: Replacement) -> Self {
        Self {
            name,
            marker,
            replacement,
            excludes: None,
            required: true,
        }
    }

    fn excluding(mut self, other: &'static str) -> Self {
        self.excludes = Some(other);
        self
    }

    /// True when this rule and `other` form a mutually exclusive pair.
    pub fn conflicts_with(&self, other: &FlagRule) -> bool {
        self.excludes == Some(other.name) || other.excludes == Some(self.name)
    }
}

/// Library fragment injected in place of `marker`.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryRule {
    pub name: &'static str,
    pub marker: &'static str,
    /// Fragment path relative to the template root.
    pub template: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageSpec {
    pub id: SpecId,
    pub is_group: bool,
    /// Languages a group spans; empty for single-language specs.
    pub members: Vec<Language>,
    pub directories: Vec<&'static str>,
    pub base_files: Vec<BaseFile>,
    pub flags: Vec<FlagRule>,
    pub libraries: Vec<LibraryRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_init_path: Option<&'static str>,
}

impl LanguageSpec {
    /// True when this spec applies to `language`, directly or as a group.
    pub fn applies_to(&self, language: Language) -> bool {
        if self.is_group {
            self.members.contains(&language)
        } else {
            self.id == SpecId::Language(language)
        }
    }

    pub fn library(&self, name: &str) -> Option<&LibraryRule> {
        self.libraries.iter().find(|library| library.name == name)
    }
}

/// The full set of language specs.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigTable {
    specs: Vec<LanguageSpec>,
}

impl ConfigTable {
    pub fn new(specs: Vec<LanguageSpec>) -> Self {
        Self { specs }
    }

    /// The table shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(vec![native_group(), c_spec(), cpp_spec()])
    }

    /// The language's own (non-group) spec.
    pub fn spec(&self, language: Language) -> Option<&LanguageSpec> {
        self.specs
            .iter()
            .find(|spec| !spec.is_group && spec.applies_to(language))
    }

    /// Specs that apply to `language`: groups first, the language's own spec last.
    pub fn specs_for(&self, language: Language) -> Vec<&LanguageSpec> {
        let mut specs: Vec<&LanguageSpec> = self
            .specs
            .iter()
            .filter(|spec| spec.is_group && spec.applies_to(language))
            .collect();
        specs.extend(self.spec(language));
        specs
    }

    /// True iff exactly one non-group spec has this id.
    pub fn is_valid_language(&self, id: &str) -> bool {
        self.specs
            .iter()
            .filter(|spec| !spec.is_group && spec.id.as_str() == id)
            .count()
            == 1
    }

    /// Resolve a user-supplied id to a registered language.
    pub fn language(&self, id: &str) -> Result<Language> {
        let invalid = || ScaffoldError::InvalidLanguage {
            id: id.to_string(),
            known: self.languages().iter().map(|l| l.to_string()).collect(),
        };
        if !self.is_valid_language(id) {
            return Err(invalid());
        }
        Language::from_id(id).ok_or_else(invalid)
    }

    /// Registered, user-selectable languages in table order.
    pub fn languages(&self) -> Vec<Language> {
        self.specs
            .iter()
            .filter(|spec| !spec.is_group)
            .filter_map(|spec| match spec.id {
                SpecId::Language(language) => Some(language),
                SpecId::Native => None,
            })
            .collect()
    }

    /// Flag rules visible to `language`, in spec-then-declaration order.
    pub fn flags_for(&self, language: Language) -> Vec<&FlagRule> {
        self.specs_for(language)
            .into_iter()
            .flat_map(|spec| spec.flags.iter())
            .collect()
    }

    /// Library rules visible to `language`, in spec-then-declaration order.
    pub fn libraries_for(&self, language: Language) -> Vec<&LibraryRule> {
        self.specs_for(language)
            .into_iter()
            .flat_map(|spec| spec.libraries.iter())
            .collect()
    }

    /// Check the table's structural invariants.
    pub fn validate(&self) -> Result<()> {
        let mut ids = BTreeSet::new();
        for spec in &self.specs {
            if !ids.insert(spec.id) {
                return Err(table_error(format!("duplicate spec id {}", spec.id)));
            }
            validate_spec_shape(spec)?;
        }
        for language in self.languages() {
            validate_combination(language, &self.specs_for(language))?;
        }
        Ok(())
    }
}

fn table_error(message: String) -> ScaffoldError {
    ScaffoldError::Table(message)
}

fn validate_spec_shape(spec: &LanguageSpec) -> Result<()> {
    if spec.is_group {
        if spec.members.is_empty() {
            return Err(table_error(format!("group {} has no members", spec.id)));
        }
        let id = spec.id.as_str();
        for member in &spec.members {
            if !id.split('+').any(|part| part == member.as_str()) {
                return Err(table_error(format!(
                    "group {id} does not name member {member}"
                )));
            }
        }
    } else if !spec.members.is_empty() {
        return Err(table_error(format!(
            "language spec {} must not list members",
            spec.id
        )));
    }
    for dir in &spec.directories {
        validate_relative_path(dir, spec.id)?;
    }
    for file in &spec.base_files {
        validate_relative_path(file.template, spec.id)?;
        validate_relative_path(file.destination, spec.id)?;
    }
    for library in &spec.libraries {
        validate_relative_path(library.template, spec.id)?;
    }
    if let Some(path) = spec.repo_init_path {
        validate_relative_path(path, spec.id)?;
    }
    Ok(())
}

fn validate_combination(language: Language, specs: &[&LanguageSpec]) -> Result<()> {
    let mut markers = BTreeSet::new();
    let mut flag_names = BTreeSet::new();
    let mut library_names = BTreeSet::new();
    for spec in specs {
        for flag in &spec.flags {
            if flag.marker.is_empty() {
                return Err(table_error(format!("flag {} has an empty marker", flag.name)));
            }
            if !markers.insert(flag.marker) {
                return Err(table_error(format!(
                    "marker {} is used twice for {language}",
                    flag.marker
                )));
            }
            if !flag_names.insert(flag.name) {
                return Err(table_error(format!(
                    "flag {} is declared twice for {language}",
                    flag.name
                )));
            }
        }
        for library in &spec.libraries {
            if library.marker.is_empty() {
                return Err(table_error(format!(
                    "library {} has an empty marker",
                    library.name
                )));
            }
            if !markers.insert(library.marker) {
                return Err(table_error(format!(
                    "marker {} is used twice for {language}",
                    library.marker
                )));
            }
            if !library_names.insert(library.name) {
                return Err(table_error(format!(
                    "library {} is declared twice for {language}",
                    library.name
                )));
            }
        }
    }
    for spec in specs {
        for flag in &spec.flags {
            let Some(other) = flag.excludes else {
                continue;
            };
            if other == flag.name {
                return Err(table_error(format!("flag {} excludes itself", flag.name)));
            }
            if !flag_names.contains(other) {
                return Err(table_error(format!(
                    "flag {} excludes unknown flag {other} for {language}",
                    flag.name
                )));
            }
        }
    }
    Ok(())
}

fn validate_relative_path(rel: &str, spec: SpecId) -> Result<()> {
    let path = Path::new(rel);
    let escapes = path
        .components()
        .any(|component| matches!(component, Component::ParentDir));
    if rel.is_empty() || path.is_absolute() || escapes {
        return Err(table_error(format!(
            "{spec}: paths must be relative without '..' (got {rel:?})"
        )));
    }
    Ok(())
}

fn native_group() -> LanguageSpec {
    LanguageSpec {
        id: SpecId::Native,
        is_group: true,
        members: vec![Language::C, Language::Cpp],
        directories: vec!["source", "projects", "bin", "source/inc", "source/src"],
        base_files: vec![
            BaseFile {
                template: "gitignore",
                destination: "source/.gitignore",
                gate: FileGate::Always,
                substitute: false,
                executable: false,
            },
            BaseFile {
                template: "CMakeLists.txt",
                destination: "source/CMakeLists.txt",
                gate: FileGate::Always,
                substitute: true,
                executable: false,
            },
            BaseFile {
                template: "generate.sh",
                destination: "projects/generate.sh",
                gate: FileGate::BuildGenerator,
                substitute: true,
                executable: true,
            },
        ],
        flags: vec![
            FlagRule::required("project", "#PM_PROJECT_NAME#", Replacement::ProjectName),
            FlagRule::optional(
                "debug",
                "#PM_FLAG_DEBUG#",
                "set(CMAKE_BUILD_TYPE Debug)\nadd_compile_options(-g -O0)",
            )
            .excluding("release"),
            FlagRule::optional(
                "release",
                "#PM_FLAG_RELEASE#",
                "set(CMAKE_BUILD_TYPE Release)\nadd_compile_options(-O2)",
            )
            .excluding("debug"),
            FlagRule::optional(
                "warnings",
                "#PM_FLAG_WARNINGS#",
                "add_compile_options(-Wall -Wextra -pedantic)",
            ),
            FlagRule::optional("werror", "#PM_FLAG_WERROR#", "add_compile_options(-Werror)"),
        ],
        libraries: vec![
            LibraryRule {
                name: "threads",
                marker: "#PM_LIB_THREADS#",
                template: "libs/threads.cmake",
            },
            LibraryRule {
                name: "math",
                marker: "#PM_LIB_MATH#",
                template: "libs/math.cmake",
            },
        ],
        repo_init_path: Some("source"),
    }
}

fn c_spec() -> LanguageSpec {
    LanguageSpec {
        id: SpecId::Language(Language::C),
        is_group: false,
        members: Vec::new(),
        directories: Vec::new(),
        base_files: vec![
            BaseFile {
                template: "c/main.c",
                destination: "source/src/main.c",
                gate: FileGate::Always,
                substitute: true,
                executable: false,
            },
            BaseFile {
                template: "c/header.h",
                destination: "source/inc/header.h",
                gate: FileGate::Extras,
                substitute: true,
                executable: false,
            },
            BaseFile {
                template: "c/header.c",
                destination: "source/src/header.c",
                gate: FileGate::Extras,
                substitute: true,
                executable: false,
            },
        ],
        flags: vec![
            FlagRule::required("language", "#PM_LANGUAGE#", Replacement::Text("C")),
            FlagRule::required(
                "sources",
                "#PM_SOURCES#",
                Replacement::Text("file(GLOB PM_SOURCES src/*.c)"),
            ),
            FlagRule::optional("stdc99", "#PM_FLAG_STDC99#", "set(CMAKE_C_STANDARD 99)")
                .excluding("stdc11"),
            FlagRule::optional("stdc11", "#PM_FLAG_STDC11#", "set(CMAKE_C_STANDARD 11)")
                .excluding("stdc99"),
        ],
        libraries: vec![
            LibraryRule {
                name: "curl",
                marker: "#PM_LIB_CURL#",
                template: "libs/curl.cmake",
            },
            LibraryRule {
                name: "sqlite3",
                marker: "#PM_LIB_SQLITE3#",
                template: "libs/sqlite3.cmake",
            },
        ],
        repo_init_path: None,
    }
}

fn cpp_spec() -> LanguageSpec {
    LanguageSpec {
        id: SpecId::Language(Language::Cpp),
        is_group: false,
        members: Vec::new(),
        directories: Vec::new(),
        base_files: vec![
            BaseFile {
                template: "cpp/main.cpp",
                destination: "source/src/main.cpp",
                gate: FileGate::Always,
                substitute: true,
                executable: false,
            },
            BaseFile {
                template: "cpp/header.hpp",
                destination: "source/inc/header.hpp",
                gate: FileGate::Extras,
                substitute: true,
                executable: false,
            },
            BaseFile {
                template: "cpp/header.cpp",
                destination: "source/src/header.cpp",
                gate: FileGate::Extras,
                substitute: true,
                executable: false,
            },
        ],
        flags: vec![
            FlagRule::required("language", "#PM_LANGUAGE#", Replacement::Text("CXX")),
            FlagRule::required(
                "sources",
                "#PM_SOURCES#",
                Replacement::Text("file(GLOB PM_SOURCES src/*.cpp)"),
            ),
            FlagRule::optional(
                "stdcpp11",
                "#PM_FLAG_STDCPP11#",
                "set(CMAKE_CXX_STANDARD 11)\nset(CMAKE_CXX_STANDARD_REQUIRED ON)",
            )
            .excluding("stdcpp17"),
            FlagRule::optional(
                "stdcpp14",
                "#PM_FLAG_STDCPP14#",
                "set(CMAKE_CXX_STANDARD 14)\nset(CMAKE_CXX_STANDARD_REQUIRED ON)",
            ),
            FlagRule::optional(
                "stdcpp17",
                "#PM_FLAG_STDCPP17#",
                "set(CMAKE_CXX_STANDARD 17)\nset(CMAKE_CXX_STANDARD_REQUIRED ON)",
            )
            .excluding("stdcpp11"),
        ],
        libraries: vec![
            LibraryRule {
                name: "boost",
                marker: "#PM_LIB_BOOST#",
                template: "libs/boost.cmake",
            },
            LibraryRule {
                name: "sfml",
                marker: "#PM_LIB_SFML#",
                template: "libs/sfml.cmake",
            },
        ],
        repo_init_path: None,
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
