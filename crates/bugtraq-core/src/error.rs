//! Error types for bugtraq-core

/// Result type for bugtraq-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving bugtraq configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying key-value source failed to answer a lookup
    #[error("Config source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// More than one numbered `logregexN` entry exists for a tracker
    #[error(
        "More than three logregex entries found for {tracker}. This is not supported anymore since bugtraq version 0.3, use logfilterregex and loglinkregex instead."
    )]
    LegacyFormat { tracker: String },

    /// `projects` is present but lists no usable project name
    #[error("'{tracker}.projects' must specify at least one project or be not present at all.")]
    EmptyProjects { tracker: String },
}

impl Error {
    /// Wrap a failure raised by a [`ConfigSource`](crate::ConfigSource) implementation
    pub fn from_source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}
