//! Git repository fixtures for bugtraq tests.
//!
//! [`TestRepo`] owns a temporary directory holding either a repository with a
//! work tree or a bare repository. Commits are written directly through `git2`
//! so the fixtures work the same in both layouts and need no `git` binary.

use std::fs;
use std::path::Path;

use git2::{ConfigLevel, ObjectType, Oid, Repository, Signature};
use tempfile::TempDir;

/// Mode of a regular, non-executable file in a git tree.
pub const MODE_REGULAR: i32 = 0o100_644;
/// Mode of an executable file in a git tree.
pub const MODE_EXECUTABLE: i32 = 0o100_755;
/// Mode of a symbolic link in a git tree.
pub const MODE_SYMLINK: i32 = 0o120_000;

/// A temporary git repository.
///
/// # Example
///
/// ```rust,no_run
/// use bugtraq_test_utils::TestRepo;
///
/// let repo = TestRepo::bare();
/// repo.commit_files(&[(".gitbugtraq", &b"[bugtraq]\n\turl = https://issues\n"[..])]);
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    /// Initialise a repository with a work tree.
    ///
    /// # Panics
    /// Panics if the repository cannot be created.
    pub fn new() -> Self {
        let temp_dir = new_temp_dir();
        let repo = Repository::init(temp_dir.path()).unwrap_or_else(|e| {
            panic!(
                "TestRepo::new: failed to init repository at {}: {e}",
                temp_dir.path().display()
            )
        });
        Self { temp_dir, repo }
    }

    /// Initialise a bare repository.
    ///
    /// # Panics
    /// Panics if the repository cannot be created.
    pub fn bare() -> Self {
        let temp_dir = new_temp_dir();
        let repo = Repository::init_bare(temp_dir.path()).unwrap_or_else(|e| {
            panic!(
                "TestRepo::bare: failed to init bare repository at {}: {e}",
                temp_dir.path().display()
            )
        });
        Self { temp_dir, repo }
    }

    /// Return the root of the temporary directory.
    ///
    /// For a work tree repository this is the work tree, for a bare one the
    /// git directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Set `name` (e.g. `bugtraq.jira.url`) in the repository-local config.
    ///
    /// # Panics
    /// Panics if the local config cannot be opened or written.
    pub fn set_config(&self, name: &str, value: &str) {
        let mut config = self
            .repo
            .config()
            .and_then(|c| c.open_level(ConfigLevel::Local))
            .unwrap_or_else(|e| panic!("TestRepo::set_config: failed to open local config: {e}"));
        config
            .set_str(name, value)
            .unwrap_or_else(|e| panic!("TestRepo::set_config: failed to set {name}: {e}"));
    }

    /// Write a file relative to [`root`](Self::root) without committing it.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestRepo::write_file: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&full_path, content).unwrap_or_else(|e| {
            panic!("TestRepo::write_file: failed to write {}: {e}", full_path.display())
        });
    }

    /// Commit regular files at the top level of a new tree and move HEAD to it.
    pub fn commit_files(&self, files: &[(&str, &[u8])]) -> Oid {
        let entries: Vec<_> = files
            .iter()
            .map(|(name, content)| (*name, *content, MODE_REGULAR))
            .collect();
        self.commit_tree(&entries, None)
    }

    /// Commit blobs with explicit file modes, optionally declaring a commit
    /// `encoding` header, and move HEAD (`refs/heads/main`) to the commit.
    ///
    /// # Panics
    /// Panics if any object cannot be written.
    pub fn commit_tree(&self, entries: &[(&str, &[u8], i32)], encoding: Option<&str>) -> Oid {
        let mut builder = self
            .repo
            .treebuilder(None)
            .unwrap_or_else(|e| fail("create tree builder", e));
        for (name, content, mode) in entries {
            let blob = self
                .repo
                .blob(content)
                .unwrap_or_else(|e| fail("write blob", e));
            builder
                .insert(*name, blob, *mode)
                .unwrap_or_else(|e| fail("insert tree entry", e));
        }
        let tree_id = builder.write().unwrap_or_else(|e| fail("write tree", e));
        let tree = self
            .repo
            .find_tree(tree_id)
            .unwrap_or_else(|e| fail("find tree", e));

        let sig = Signature::now("Test User", "test@example.com")
            .unwrap_or_else(|e| fail("create signature", e));
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        let buffer = self
            .repo
            .commit_create_buffer(&sig, &sig, "Update bugtraq config", &tree, &parents)
            .unwrap_or_else(|e| fail("create commit buffer", e));
        let mut raw = buffer.to_vec();
        if let Some(encoding) = encoding {
            let header_end = raw
                .windows(2)
                .position(|w| w == b"\n\n")
                .unwrap_or_else(|| panic!("TestRepo::commit_tree: malformed commit buffer"));
            let tail = raw.split_off(header_end);
            raw.extend_from_slice(format!("\nencoding {encoding}").as_bytes());
            raw.extend_from_slice(&tail);
        }

        let commit_id = self
            .repo
            .odb()
            .and_then(|odb| odb.write(ObjectType::Commit, &raw))
            .unwrap_or_else(|e| fail("write commit", e));
        self.repo
            .reference("refs/heads/main", commit_id, true, "commit")
            .unwrap_or_else(|e| fail("update refs/heads/main", e));
        self.repo
            .set_head("refs/heads/main")
            .unwrap_or_else(|e| fail("update HEAD", e));

        commit_id
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn fail(what: &str, e: git2::Error) -> ! {
    panic!("TestRepo::commit_tree: failed to {what}: {e}")
}

fn new_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|e| panic!("TestRepo: failed to create temp dir: {e}"))
}
