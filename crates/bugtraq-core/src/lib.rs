//! Bug tracker integration config for git repositories
//!
//! Resolves the `bugtraq` section of a repository's configuration into a list
//! of [`TrackerEntry`] values. Configuration is read from two layers: the
//! repository-local config and an optional shared base file (`.gitbugtraq`).
//! Repository-local values take precedence.
//!
//! Both layers are supplied through the [`ConfigSource`] trait, so this crate
//! performs no I/O and has no git dependency.
//!
//! # Example
//!
//! ```
//! use bugtraq_core::{BugtraqConfig, MemorySource};
//!
//! let repo = MemorySource::new()
//!     .with("bugtraq", None, "url", "https://issues.example.com/%BUGID%")
//!     .with("bugtraq", None, "logregex", "#(\\d+)");
//!
//! let config = BugtraqConfig::read(&repo, None).unwrap().unwrap();
//! assert_eq!(config.entries().len(), 1);
//! assert_eq!(config.entries()[0].id_regex(), "#(\\d+)");
//! ```

pub mod entry;
pub mod error;
pub mod resolver;
pub mod source;

pub use entry::{TrackerEntry, TrackerName};
pub use error::{Error, Result};
pub use resolver::{BugtraqConfig, keys};
pub use source::{ConfigSource, MemorySource};
