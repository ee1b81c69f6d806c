//! Check command implementation
//!
//! Implements `gemlock check` to validate a lock file without changing it.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::output::{status, OutputConfig};
use crate::core::lockfile::{lockfile_path, Lockfile};

/// Execute the check command
///
/// A lock file that fails to parse is returned as an error so the process
/// exits non-zero.
pub fn execute(gemfile: &Path, output: &OutputConfig) -> Result<()> {
    let path = lockfile_path(gemfile);
    let lock = Lockfile::load(gemfile)
        .with_context(|| format!("{} is not a valid lock file", path.display()))?;

    tracing::info!("Checked {}", path.display());

    if output.json {
        println!(
            "{}",
            json!({
                "path": path,
                "valid": true,
                "sources": lock.sources.len(),
                "specs": lock.spec_count(),
                "platforms": lock.platforms.len(),
                "dependencies": lock.dependencies.len(),
            })
        );
        return Ok(());
    }

    if lock.is_empty() {
        output.status(status::WARNING, &format!("{} is empty or missing", path.display()));
    } else {
        output.status(
            status::SUCCESS,
            &format!(
                "{} is valid ({} specs from {} sources, {} dependencies)",
                path.display(),
                lock.spec_count(),
                lock.sources.len(),
                lock.dependencies.len()
            ),
        );
    }
    Ok(())
}
