//! Key-value sources the resolver reads from
//!
//! A [`ConfigSource`] exposes git-config style lookups: values are addressed by
//! section, optional subsection and key. The resolver reads from two sources,
//! the repository-local config and the optional base file.

use indexmap::IndexSet;

use crate::Result;

/// Read-only access to git-config style key-value settings.
///
/// Implementations wrap their own failures with [`Error::from_source`](crate::Error::from_source).
pub trait ConfigSource {
    /// List the subsection names that exist under `section`.
    fn subsections(&self, section: &str) -> Result<Vec<String>>;

    /// Get the value of `key` in `section` (and `subsection`, if given).
    ///
    /// Returns `None` when the key is not set.
    fn get_string(&self, section: &str, subsection: Option<&str>, key: &str)
    -> Result<Option<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryEntry {
    section: String,
    subsection: Option<String>,
    key: String,
    value: String,
}

/// In-memory [`ConfigSource`] for values that are already parsed.
///
/// Section and key names are matched case-insensitively, subsection names
/// case-sensitively, the same way git config does. When a key is set more than
/// once the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    entries: Vec<MemoryEntry>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(
        mut self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        self.set(section, subsection, key, value);
        self
    }

    /// Add a value.
    pub fn set(
        &mut self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
        value: impl Into<String>,
    ) {
        self.entries.push(MemoryEntry {
            section: section.to_ascii_lowercase(),
            subsection: subsection.map(str::to_string),
            key: key.to_ascii_lowercase(),
            value: value.into(),
        });
    }
}

impl ConfigSource for MemorySource {
    fn subsections(&self, section: &str) -> Result<Vec<String>> {
        let section = section.to_ascii_lowercase();
        let names: IndexSet<&str> = self
            .entries
            .iter()
            .filter(|e| e.section == section)
            .filter_map(|e| e.subsection.as_deref())
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }

    fn get_string(
        &self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
    ) -> Result<Option<String>> {
        let section = section.to_ascii_lowercase();
        let key = key.to_ascii_lowercase();
        Ok(self
            .entries
            .iter()
            .rev()
            .find(|e| e.section == section && e.subsection.as_deref() == subsection && e.key == key)
            .map(|e| e.value.clone()))
    }
}
