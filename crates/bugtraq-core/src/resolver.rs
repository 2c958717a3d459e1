//! Two-layer bugtraq config resolution
//!
//! [`BugtraqConfig::read`] merges the repository config with the optional base
//! file, discovers every configured tracker and normalizes the older config
//! formats into [`TrackerEntry`] values.
//!
//! # Legacy formats
//!
//! When neither `logfilterregex` nor `loglinkregex` is set, `logregex` may be
//! written in one of two older forms:
//!
//! 1. Two lines (TortoiseGit): the first line is the filter regex, the second
//!    the id regex.
//! 2. `logregex` plus a single `logregex1` (bugtraq < 0.3): `logregex` is the
//!    filter regex and `logregex1` the id regex. Two or more numbered entries
//!    are rejected.

use indexmap::IndexSet;

use crate::entry::{TrackerEntry, TrackerName};
use crate::source::ConfigSource;
use crate::{Error, Result};

/// Section and key names of the bugtraq config vocabulary
pub mod keys {
    pub const SECTION: &str = "bugtraq";

    pub const URL: &str = "url";
    pub const ENABLED: &str = "enabled";
    pub const LOG_REGEX: &str = "logregex";
    pub const LOG_FILTER_REGEX: &str = "logfilterregex";
    pub const LOG_LINK_REGEX: &str = "loglinkregex";
    pub const LOG_LINK_TEXT: &str = "loglinktext";
    pub const PROJECTS: &str = "projects";
}

/// The resolved bugtraq configuration of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugtraqConfig {
    entries: Vec<TrackerEntry>,
}

impl BugtraqConfig {
    /// Resolve the bugtraq configuration from `repo` and the optional `base`.
    ///
    /// Returns `Ok(None)` when no tracker is configured. A tracker that has a
    /// `url` but no `logregex` also yields `Ok(None)` for the whole
    /// configuration, not just that tracker.
    ///
    /// Trackers are returned in discovery order: the anonymous tracker alone if
    /// `bugtraq.url` is set, otherwise the repository's subsections in the order
    /// the repository source lists them, then subsections only the base lists.
    pub fn read(
        repo: &dyn ConfigSource,
        base: Option<&dyn ConfigSource>,
    ) -> Result<Option<Self>> {
        let layers = Layers { repo, base };

        let mut entries = Vec::new();
        for name in layers.tracker_names()? {
            match layers.resolve_tracker(name)? {
                Resolution::Entry(entry) => entries.push(entry),
                Resolution::Skipped => {}
                Resolution::MissingIdRegex(name) => {
                    tracing::warn!(
                        tracker = %name,
                        "Tracker has a url but no logregex, ignoring bugtraq configuration"
                    );
                    return Ok(None);
                }
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }

        tracing::debug!(count = entries.len(), "Resolved bugtraq configuration");
        Ok(Some(Self { entries }))
    }

    /// The configured trackers.
    pub fn entries(&self) -> &[TrackerEntry] {
        &self.entries
    }
}

/// Look up `key`, preferring `primary` and falling back to `secondary`.
///
/// Values are trimmed. A value that is empty after trimming counts as unset in
/// either layer.
pub fn lookup(
    section: &str,
    subsection: Option<&str>,
    key: &str,
    primary: &dyn ConfigSource,
    secondary: Option<&dyn ConfigSource>,
) -> Result<Option<String>> {
    if let Some(value) = non_blank(primary.get_string(section, subsection, key)?) {
        return Ok(Some(value));
    }

    match secondary {
        Some(source) => Ok(non_blank(source.get_string(section, subsection, key)?)),
        None => Ok(None),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

enum Resolution {
    Entry(TrackerEntry),
    Skipped,
    MissingIdRegex(TrackerName),
}

struct Layers<'a> {
    repo: &'a dyn ConfigSource,
    base: Option<&'a dyn ConfigSource>,
}

impl Layers<'_> {
    fn get(&self, name: &TrackerName, key: &str) -> Result<Option<String>> {
        lookup(keys::SECTION, name.subsection(), key, self.repo, self.base)
    }

    fn tracker_names(&self) -> Result<IndexSet<TrackerName>> {
        let mut names = IndexSet::new();

        if self.get(&TrackerName::Default, keys::URL)?.is_some() {
            names.insert(TrackerName::Default);
            return Ok(names);
        }

        names.extend(
            self.repo
                .subsections(keys::SECTION)?
                .into_iter()
                .map(TrackerName::Named),
        );
        if let Some(base) = self.base {
            names.extend(
                base.subsections(keys::SECTION)?
                    .into_iter()
                    .map(TrackerName::Named),
            );
        }

        Ok(names)
    }

    fn resolve_tracker(&self, name: TrackerName) -> Result<Resolution> {
        let Some(url) = self.get(&name, keys::URL)? else {
            tracing::debug!(tracker = %name, "No url configured, skipping tracker");
            return Ok(Resolution::Skipped);
        };

        if let Some(enabled) = self.get(&name, keys::ENABLED)?
            && enabled != "true"
        {
            tracing::debug!(tracker = %name, %enabled, "Tracker disabled, skipping");
            return Ok(Resolution::Skipped);
        }

        let Some(log_regex) = self.get(&name, keys::LOG_REGEX)? else {
            return Ok(Resolution::MissingIdRegex(name));
        };

        let filter_regex = self.get(&name, keys::LOG_FILTER_REGEX)?;
        let link_regex = self.get(&name, keys::LOG_LINK_REGEX)?;

        let (id_regex, filter_regex) = if filter_regex.is_none() && link_regex.is_none() {
            self.normalize_legacy(&name, log_regex)?
        } else {
            (log_regex, filter_regex)
        };

        let projects = self
            .get(&name, keys::PROJECTS)?
            .map(|list| parse_projects(&name, &list))
            .transpose()?;

        let link_text = self.get(&name, keys::LOG_LINK_TEXT)?;

        Ok(Resolution::Entry(TrackerEntry::new(
            name,
            url,
            id_regex,
            link_regex,
            filter_regex,
            link_text,
            projects,
        )))
    }

    /// Returns `(id_regex, filter_regex)` after applying the first legacy
    /// interpretation that matches.
    fn normalize_legacy(
        &self,
        name: &TrackerName,
        log_regex: String,
    ) -> Result<(String, Option<String>)> {
        if let Some((filter, id)) = split_two_lines(&log_regex) {
            tracing::debug!(tracker = %name, "Using two-line logregex format");
            return Ok((id.to_string(), Some(filter.to_string())));
        }

        let mut numbered = self.numbered_log_regexes(name)?;
        match numbered.len() {
            0 => Ok((log_regex, None)),
            1 => {
                tracing::debug!(tracker = %name, "Using numbered logregex format");
                Ok((numbered.remove(0), Some(log_regex)))
            }
            _ => Err(Error::LegacyFormat {
                tracker: name.to_string(),
            }),
        }
    }

    /// Collect `logregex1`, `logregex2`, ... up to the first unset one.
    fn numbered_log_regexes(&self, name: &TrackerName) -> Result<Vec<String>> {
        let mut found = Vec::new();
        for index in 1..=u32::MAX {
            let key = format!("{}{index}", keys::LOG_REGEX);
            match self.get(name, &key)? {
                Some(value) => found.push(value),
                None => break,
            }
        }
        Ok(found)
    }
}

fn split_two_lines(value: &str) -> Option<(&str, &str)> {
    let mut parts = value.split('\n');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Some((first, second)),
        _ => None,
    }
}

fn parse_projects(name: &TrackerName, list: &str) -> Result<Vec<String>> {
    let projects: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if projects.is_empty() {
        return Err(Error::EmptyProjects {
            tracker: name.to_string(),
        });
    }

    Ok(projects)
}
