//! git2 integration for bugtraq configuration
//!
//! Reads the bugtraq configuration of a git repository by combining the
//! repository config with the shared base file committed to the repository
//! (`.gitbugtraq`, or `.tgitconfig` as written by TortoiseGit).

pub mod base;
pub mod error;
pub mod source;

pub use base::{BASE_FILE_NAMES, BaseConfig, BaseOrigin, find_base_config};
pub use error::{Error, Result};
pub use source::GitConfigSource;

use std::path::Path;

use bugtraq_core::{BugtraqConfig, ConfigSource};
use git2::Repository;

/// Resolve the bugtraq configuration of `repo`.
///
/// Values from the repository config (all levels git2 loads for it) take
/// precedence over the base file.
pub fn read(repo: &Repository) -> Result<Option<BugtraqConfig>> {
    read_with_base(repo).map(|(config, _)| config)
}

/// Like [`read`], also returning the base file that was used, if any.
pub fn read_with_base(repo: &Repository) -> Result<(Option<BugtraqConfig>, Option<BaseConfig>)> {
    let base = find_base_config(repo)?;
    let repo_config = GitConfigSource::new(repo.config()?)?;

    let config = BugtraqConfig::read(
        &repo_config,
        base.as_ref().map(|b| b.source() as &dyn ConfigSource),
    )?;
    Ok((config, base))
}

/// Open the repository containing `path`.
pub fn discover(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(|e| Error::RepositoryNotFound {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Discover the repository containing `path` and resolve its bugtraq configuration.
pub fn read_at(path: &Path) -> Result<Option<BugtraqConfig>> {
    read(&discover(path)?)
}
