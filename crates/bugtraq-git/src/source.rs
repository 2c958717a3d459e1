//! [`ConfigSource`] over git2 config snapshots

use std::fmt;

use bugtraq_core::ConfigSource;
use git2::{Config, ErrorCode};
use indexmap::IndexSet;

/// A read-only snapshot of a git config.
pub struct GitConfigSource {
    config: Config,
}

impl fmt::Debug for GitConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitConfigSource").finish_non_exhaustive()
    }
}

impl GitConfigSource {
    /// Take a snapshot of `config`.
    ///
    /// Later changes to the underlying files are not visible through the
    /// returned source.
    pub fn new(mut config: Config) -> crate::Result<Self> {
        let config = config.snapshot()?;
        Ok(Self { config })
    }
}

impl ConfigSource for GitConfigSource {
    fn subsections(&self, section: &str) -> bugtraq_core::Result<Vec<String>> {
        let mut entries = self
            .config
            .entries(None)
            .map_err(bugtraq_core::Error::from_source)?;

        let mut names = IndexSet::new();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(bugtraq_core::Error::from_source)?;
            if let Some(subsection) = entry.name().and_then(|n| subsection_of(n, section)) {
                names.insert(subsection.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn get_string(
        &self,
        section: &str,
        subsection: Option<&str>,
        key: &str,
    ) -> bugtraq_core::Result<Option<String>> {
        let name = match subsection {
            Some(subsection) => format!("{section}.{subsection}.{key}"),
            None => format!("{section}.{key}"),
        };

        match self.config.get_string(&name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(bugtraq_core::Error::from_source(e)),
        }
    }
}

/// Extract the subsection from a full entry name such as `bugtraq.jira.url`.
///
/// The subsection is everything between the first and the last dot, so it may
/// itself contain dots.
fn subsection_of<'a>(name: &'a str, section: &str) -> Option<&'a str> {
    let (entry_section, rest) = name.split_once('.')?;
    if !entry_section.eq_ignore_ascii_case(section) {
        return None;
    }
    let (subsection, _key) = rest.rsplit_once('.')?;
    Some(subsection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsection_of_entry_names() {
        assert_eq!(subsection_of("bugtraq.jira.url", "bugtraq"), Some("jira"));
        assert_eq!(subsection_of("bugtraq.my.tracker.url", "bugtraq"), Some("my.tracker"));
        assert_eq!(subsection_of("bugtraq.url", "bugtraq"), None);
        assert_eq!(subsection_of("core.bare", "bugtraq"), None);
        assert_eq!(subsection_of("bugtraqx.jira.url", "bugtraq"), None);
    }
}
