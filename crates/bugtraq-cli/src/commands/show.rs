//! Configuration display command

use std::path::Path;

use bugtraq_core::TrackerEntry;
use colored::Colorize;

use crate::error::Result;

/// Print the resolved trackers of the repository containing `path`.
pub fn run_show(path: &Path, json: bool) -> Result<()> {
    let repo = bugtraq_git::discover(path)?;
    let (config, base) = bugtraq_git::read_with_base(&repo)?;

    let entries = config.as_ref().map(|c| c.entries()).unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    match &base {
        Some(base) => println!(
            "  {:<14} {} ({})",
            "Base config:".dimmed(),
            base.file_name(),
            base.origin()
        ),
        None => println!("  {:<14} {}", "Base config:".dimmed(), "(none)".dimmed()),
    }
    println!();

    if entries.is_empty() {
        println!("No bugtraq configuration found");
        return Ok(());
    }

    for entry in entries {
        print_entry(entry);
    }

    Ok(())
}

fn print_entry(entry: &TrackerEntry) {
    println!("{}", entry.name().to_string().bold());
    print_field("url", Some(entry.url()));
    print_field("logregex", Some(entry.id_regex()));
    print_field("filter regex", entry.filter_regex());
    print_field("link regex", entry.link_regex());
    print_field("link text", entry.link_text());
    if let Some(projects) = entry.projects() {
        print_field("projects", Some(&projects.join(", ")));
    }
    println!();
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  {:<14} {}", format!("{label}:").dimmed(), value);
    }
}
