//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// bugtraq - Inspect the bug tracker configuration of a git repository
#[derive(Parser, Debug)]
#[command(name = "bugtraq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Repository selection shared by all commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RepoArgs {
    /// Path inside the repository
    #[arg(short, long, env = "BUGTRAQ_REPO", default_value = ".")]
    pub path: PathBuf,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved trackers
    ///
    /// Combines the repository config with .gitbugtraq (or .tgitconfig).
    /// Repository config values take precedence.
    Show {
        #[command(flatten)]
        repo: RepoArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate the bugtraq configuration
    Check {
        #[command(flatten)]
        repo: RepoArgs,
    },
}
