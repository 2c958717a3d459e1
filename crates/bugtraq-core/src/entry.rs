//! Resolved tracker entries

use std::fmt;

use serde::Serialize;

/// Name of a configured tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum TrackerName {
    /// Keys set directly under `[bugtraq]`, without a subsection
    Default,
    /// Keys set under `[bugtraq "<name>"]`
    Named(String),
}

impl TrackerName {
    /// The subsection this tracker's keys live in.
    pub fn subsection(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for TrackerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "bugtraq"),
            Self::Named(name) => write!(f, "bugtraq.{name}"),
        }
    }
}

/// A single bug tracker, with all legacy formats already normalized.
///
/// `url` and `id_regex` are never empty. `projects`, when present, holds at
/// least one non-empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerEntry {
    name: TrackerName,
    url: String,
    id_regex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<Vec<String>>,
}

impl TrackerEntry {
    pub(crate) fn new(
        name: TrackerName,
        url: String,
        id_regex: String,
        link_regex: Option<String>,
        filter_regex: Option<String>,
        link_text: Option<String>,
        projects: Option<Vec<String>>,
    ) -> Self {
        Self {
            name,
            url,
            id_regex,
            link_regex,
            filter_regex,
            link_text,
            projects,
        }
    }

    pub fn name(&self) -> &TrackerName {
        &self.name
    }

    /// Issue URL template
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pattern that identifies a bug id
    pub fn id_regex(&self) -> &str {
        &self.id_regex
    }

    /// Pattern for the part of the message to turn into a link
    pub fn link_regex(&self) -> Option<&str> {
        self.link_regex.as_deref()
    }

    /// Pattern that pre-filters message text before `id_regex` is applied
    pub fn filter_regex(&self) -> Option<&str> {
        self.filter_regex.as_deref()
    }

    pub fn link_text(&self) -> Option<&str> {
        self.link_text.as_deref()
    }

    /// Projects this tracker is restricted to; `None` means all projects.
    pub fn projects(&self) -> Option<&[String]> {
        self.projects.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_name_display() {
        assert_eq!(TrackerName::Default.to_string(), "bugtraq");
        assert_eq!(TrackerName::Named("jira".into()).to_string(), "bugtraq.jira");
    }

    #[test]
    fn tracker_name_subsection() {
        assert_eq!(TrackerName::Default.subsection(), None);
        assert_eq!(TrackerName::Named("jira".into()).subsection(), Some("jira"));
    }
}
