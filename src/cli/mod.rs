//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::DEFAULT_GEMFILE;
use commands::Commands;
use output::OutputConfig;

/// Gemlock - Gemfile.lock reader and canonical writer
///
/// Inspect, validate and reformat the lock file of a Ruby project.
#[derive(Parser, Debug)]
#[command(name = "gemlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Dependency declaration file; the lock file is `<GEMFILE>.lock`
    #[arg(long, global = true, env = "GEMLOCK_GEMFILE", default_value = DEFAULT_GEMFILE)]
    pub gemfile: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self, output: &OutputConfig) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(&self.gemfile, output)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
