use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filenames the plan builder must never touch.
///
/// Supplied by the caller (typically the tool's own executable and any
/// suffixes from its config), so the core carries no hardcoded list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusions {
    /// Name endings such as ".exe"; matched case-sensitively
    #[serde(default)]
    pub suffixes: BTreeSet<String>,
    /// Exact filenames
    #[serde(default)]
    pub names: BTreeSet<String>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.add_suffix(suffix);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.add_name(name);
        self
    }

    pub fn add_suffix(&mut self, suffix: impl Into<String>) {
        let suffix = suffix.into();
        if !suffix.is_empty() {
            self.suffixes.insert(suffix);
        }
    }

    pub fn add_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.names.insert(name);
        }
    }

    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
            || self
                .suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty() && self.names.is_empty()
    }
}
