//! Locating the shared base config file
//!
//! The base file is committed to the repository so every clone shares the same
//! tracker settings. In a repository with a work tree it is read from the work
//! tree root; in a bare repository it is read from the tree of `HEAD`.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use git2::{Config, ErrorCode, ObjectType, Oid, Repository};

use crate::source::GitConfigSource;
use crate::{Error, Result};

/// Base file names, in lookup order.
pub const BASE_FILE_NAMES: [&str; 2] = [".gitbugtraq", ".tgitconfig"];

const FILE_TYPE_MASK: i32 = 0o170_000;
const REGULAR_FILE_TYPE: i32 = 0o100_000;

/// Where a base file was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseOrigin {
    /// A file in the work tree
    WorkTree(PathBuf),
    /// A blob in the tree of the `HEAD` commit of a bare repository
    HeadTree { commit: Oid },
}

impl fmt::Display for BaseOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkTree(path) => write!(f, "{}", path.display()),
            Self::HeadTree { commit } => write!(f, "HEAD ({commit})"),
        }
    }
}

/// A loaded base config file.
pub struct BaseConfig {
    file_name: &'static str,
    origin: BaseOrigin,
    source: GitConfigSource,
}

impl BaseConfig {
    /// File name the config was loaded from, one of [`BASE_FILE_NAMES`].
    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn origin(&self) -> &BaseOrigin {
        &self.origin
    }

    pub fn source(&self) -> &GitConfigSource {
        &self.source
    }
}

impl fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseConfig")
            .field("file_name", &self.file_name)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Find and load the base config of `repo`.
///
/// Tries each of [`BASE_FILE_NAMES`] in order and returns the first one found.
pub fn find_base_config(repo: &Repository) -> Result<Option<BaseConfig>> {
    for file_name in BASE_FILE_NAMES {
        let base = if repo.is_bare() {
            load_from_head(repo, file_name)?
        } else {
            load_from_work_tree(repo, file_name)?
        };

        if let Some(base) = base {
            tracing::debug!(file = file_name, origin = %base.origin, "Loaded bugtraq base config");
            return Ok(Some(base));
        }
    }

    tracing::debug!("No bugtraq base config found");
    Ok(None)
}

fn load_from_work_tree(repo: &Repository, file_name: &'static str) -> Result<Option<BaseConfig>> {
    let Some(workdir) = repo.workdir() else {
        return Ok(None);
    };

    let path = workdir.join(file_name);
    if !path.is_file() {
        return Ok(None);
    }

    let source = open_config(&path, file_name)?;
    Ok(Some(BaseConfig {
        file_name,
        origin: BaseOrigin::WorkTree(path),
        source,
    }))
}

/// Load `file_name` from the tree of the `HEAD` commit.
///
/// Both 100644 and 100755 blobs are accepted; symlinks, submodules and trees
/// are not. Include sections are removed before parsing.
fn load_from_head(repo: &Repository, file_name: &'static str) -> Result<Option<BaseConfig>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(head_id) = head.target().filter(|id| !id.is_zero()) else {
        return Ok(None);
    };

    let commit = repo.find_commit(head_id)?;
    let tree = commit.tree()?;
    let Some(entry) = tree.get_name(file_name) else {
        return Ok(None);
    };

    if entry.kind() != Some(ObjectType::Blob)
        || entry.filemode() & FILE_TYPE_MASK != REGULAR_FILE_TYPE
    {
        tracing::debug!(file = file_name, mode = entry.filemode(), "Base config in HEAD is not a regular file");
        return Ok(None);
    }

    let blob = repo.find_blob(entry.id())?;
    let text = decode(blob.content(), commit.message_encoding());
    let source = parse_config(&strip_includes(&text, file_name), file_name)?;

    Ok(Some(BaseConfig {
        file_name,
        origin: BaseOrigin::HeadTree { commit: head_id },
        source,
    }))
}

fn open_config(path: &Path, file_name: &str) -> Result<GitConfigSource> {
    let config = Config::open(path).map_err(|e| Error::InvalidBaseFile {
        file: file_name.to_string(),
        source: e,
    })?;
    GitConfigSource::new(config)
}

/// git2 only parses config files from disk, so the text goes through a
/// temporary file that lives until the snapshot is taken.
fn parse_config(text: &str, file_name: &str) -> Result<GitConfigSource> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    open_config(file.path(), file_name)
}

/// Decode a blob using the encoding its commit declares.
///
/// Commits without an encoding header, and commits naming an encoding label
/// that is not recognized, are decoded as UTF-8. Malformed sequences become
/// U+FFFD.
fn decode(bytes: &[u8], encoding: Option<&str>) -> String {
    let codec = match encoding {
        None => UTF_8,
        Some(label) => Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
            tracing::warn!(encoding = label, "Unsupported commit encoding, decoding base config as UTF-8");
            UTF_8
        }),
    };

    let (text, _, had_errors) = codec.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = codec.name(), "Base config has malformed bytes, decoding lossily");
    }
    text.into_owned()
}

/// Remove `[include]` and `[includeIf ...]` sections from committed config
/// text.
///
/// libgit2 resolves include paths against the local file system, which a blob
/// read from `HEAD` must not reach.
fn strip_includes(text: &str, file_name: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut in_include = false;
    let mut dropped = 0usize;

    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with('[') {
            in_include = names_include_section(line);
        }
        if in_include {
            dropped += 1;
        } else {
            kept.push_str(line);
        }
    }

    if dropped > 0 {
        tracing::warn!(file = file_name, lines = dropped, "Ignoring include sections in committed base config");
    }
    kept
}

/// Whether any section header on `line` is `include` or `includeIf`.
fn names_include_section(line: &str) -> bool {
    line.split('[').skip(1).any(|header| {
        let name = header.trim_start();
        let end = name
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '.' | ']'))
            .unwrap_or(name.len());
        let name = &name[..end];
        name.eq_ignore_ascii_case("include") || name.eq_ignore_ascii_case("includeif")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("UTF-8"))]
    #[case(Some("utf8"))]
    #[case(Some("x-unknown"))]
    fn decode_utf8(#[case] encoding: Option<&str>) {
        assert_eq!(decode("Jürgen".as_bytes(), encoding), "Jürgen");
    }

    #[test]
    fn decode_latin1() {
        assert_eq!(decode(b"J\xfcrgen", Some("ISO-8859-1")), "Jürgen");
    }

    #[test]
    fn decode_windows_1252() {
        assert_eq!(decode(b"Price \x80", Some("windows-1252")), "Price \u{20ac}");
    }

    #[test]
    fn decode_shift_jis() {
        assert_eq!(decode(b"\x93\xfa\x96\x7b", Some("Shift_JIS")), "\u{65e5}\u{672c}");
    }

    #[test]
    fn decode_invalid_utf8_lossily() {
        assert_eq!(decode(b"J\xfcrgen", None), "J\u{fffd}rgen");
    }

    #[test]
    fn strip_includes_removes_include_sections() {
        let text = "[include]\n\tpath = /etc/other\n\
                    [bugtraq]\n\turl = https://issues\n\
                    [includeIf \"gitdir:/srv/\"]\n\tpath = /srv/extra\n\
                    [INCLUDE]\n\tpath = x\n\
                    [bugtraq \"jira\"]\n\tlogregex = X\n";

        assert_eq!(
            strip_includes(text, ".gitbugtraq"),
            "[bugtraq]\n\turl = https://issues\n[bugtraq \"jira\"]\n\tlogregex = X\n"
        );
    }

    #[test]
    fn strip_includes_keeps_include_like_names() {
        let text = "[bugtraq \"include\"]\n\turl = u\n[included]\n\tkey = v\n";
        assert_eq!(strip_includes(text, ".gitbugtraq"), text);
    }

    #[test]
    fn strip_includes_catches_header_with_inline_key() {
        let text = "[bugtraq]\n\turl = u\n[include] path = /etc/other\n";
        assert_eq!(strip_includes(text, ".gitbugtraq"), "[bugtraq]\n\turl = u\n");
    }

    #[test]
    fn parse_config_reads_subsections() {
        let source = parse_config(
            "[bugtraq \"jira\"]\n\turl = https://jira/%BUGID%\n",
            ".gitbugtraq",
        )
        .unwrap();

        let value = bugtraq_core::ConfigSource::get_string(&source, "bugtraq", Some("jira"), "url")
            .unwrap();
        assert_eq!(value.as_deref(), Some("https://jira/%BUGID%"));
    }

    #[test]
    fn parse_config_rejects_invalid_syntax() {
        let err = parse_config("[bugtraq\nurl", ".gitbugtraq").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseFile { .. }));
    }
}
