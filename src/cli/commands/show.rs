//! Show command implementation
//!
//! Implements `gemlock show` to print what a lock file records.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::OutputConfig;
use crate::core::lockfile::{lockfile_dir, lockfile_path, Lockfile};

/// Execute the show command
pub fn execute(gemfile: &Path, output: &OutputConfig) -> Result<()> {
    let path = lockfile_path(gemfile);
    let lock =
        Lockfile::load(gemfile).with_context(|| format!("Failed to load {}", path.display()))?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&lock)?);
        return Ok(());
    }

    for group in &lock.sources {
        println!("{} {}", group.source.section(), group.source);
        if let Some(dir) = group.source.expanded_path(lockfile_dir(&path)) {
            println!("  directory: {}", dir.display());
        }
        for spec in &group.specs {
            println!("  {spec}");
            for dependency in &spec.dependencies {
                println!("    {dependency}");
            }
        }
        println!();
    }

    println!("PLATFORMS");
    for platform in &lock.platforms {
        println!("  {platform}");
    }
    println!();

    println!("DEPENDENCIES");
    for dependency in &lock.dependencies {
        let marker = if dependency.is_pinned() { "!" } else { "" };
        println!("  {dependency}{marker}");
    }
    Ok(())
}
