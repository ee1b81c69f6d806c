//! Tokens command implementation
//!
//! Implements `gemlock tokens` to dump the lexical view of a lock file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::OutputConfig;
use crate::core::lockfile::lockfile_path;
use crate::core::tokenizer::Tokenizer;
use crate::infra::filesystem;

/// Execute the tokens command
pub fn execute(gemfile: &Path, output: &OutputConfig) -> Result<()> {
    let path = lockfile_path(gemfile);
    let text = filesystem::read_file_if_exists(&path)?;
    if text.is_none() {
        tracing::warn!("{} does not exist", path.display());
    }

    let tokens = Tokenizer::new()?
        .tokenize(text.as_deref(), &path)
        .with_context(|| format!("Failed to tokenize {}", path.display()))?;
    tracing::info!("{} tokens in {}", tokens.len(), path.display());

    if output.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }
    for token in &tokens {
        println!("{}:{} {token}", token.line, token.column);
    }
    Ok(())
}
