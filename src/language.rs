//! Typed identifiers for languages and language groups.
use serde::Serialize;
use std::fmt;

/// A user-selectable target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::C, Language::Cpp];

    /// Return the stable identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// Parse a command-line identifier. Matching is exact.
    pub fn from_id(id: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a table entry: either a single language or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecId {
    Language(Language),
    /// Shared rules for every native-code language (`c+cpp`).
    Native,
}

impl SpecId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecId::Language(language) => language.as_str(),
            SpecId::Native => "c+cpp",
        }
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SpecId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
