//! Configuration validation command

use std::path::Path;

use colored::Colorize;

use crate::error::Result;

/// Resolve the configuration and report whether it is valid.
///
/// Invalid configuration is returned as an error so the process exits non-zero.
pub fn run_check(path: &Path) -> Result<()> {
    let repo = bugtraq_git::discover(path)?;
    let config = bugtraq_git::read(&repo)?;

    match config {
        Some(config) => {
            let count = config.entries().len();
            let noun = if count == 1 { "tracker" } else { "trackers" };
            println!("{} {count} {noun} configured", "OK".green().bold());
        }
        None => println!("{} No bugtraq configuration found", "OK".green().bold()),
    }

    Ok(())
}
