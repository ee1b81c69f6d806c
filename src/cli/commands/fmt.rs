//! Fmt command implementation
//!
//! Implements `gemlock fmt` to rewrite a lock file in canonical form.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::cli::output::{status, OutputConfig};
use crate::core::lockfile::{lockfile_dir, lockfile_path, Lockfile};
use crate::core::writer::Writer;
use crate::infra::filesystem;

/// Execute the fmt command
///
/// With `check`, nothing is written and a non-canonical lock file is an error.
pub fn execute(gemfile: &Path, check: bool, output: &OutputConfig) -> Result<()> {
    let path = lockfile_path(gemfile);
    let Some(text) = filesystem::read_file_if_exists(&path)? else {
        bail!("No lock file found at {}", path.display());
    };

    let lock = Lockfile::parse(Some(&text), &path)
        .with_context(|| format!("{} is not a valid lock file", path.display()))?;
    let canonical = Writer::new(lockfile_dir(&path)).write(&lock.to_graph());
    let formatted = canonical == text;

    if output.json {
        println!("{}", json!({ "path": path, "formatted": formatted }));
    }

    if formatted {
        tracing::debug!("{} is already canonical", path.display());
        output.status(status::SUCCESS, &format!("{} is already formatted", path.display()));
        return Ok(());
    }

    if check {
        bail!("{} is not in canonical form", path.display());
    }

    filesystem::write_file(&path, &canonical)?;
    tracing::info!("Rewrote {}", path.display());
    output.status(status::SUCCESS, &format!("Formatted {}", path.display()));
    Ok(())
}
