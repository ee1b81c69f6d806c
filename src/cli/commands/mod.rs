//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod fmt;
pub mod show;
pub mod tokens;

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::output::OutputConfig;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the token stream of the lock file
    Tokens,

    /// Print the sources, specs, platforms and dependencies of the lock file
    Show,

    /// Parse the lock file and report the first error
    Check,

    /// Rewrite the lock file in canonical form
    Fmt {
        /// Only report whether the lock file is already canonical
        #[arg(long)]
        check: bool,
    },
}

impl Commands {
    /// Execute the command against the lock file of `gemfile`
    pub fn run(self, gemfile: &Path, output: &OutputConfig) -> Result<()> {
        match self {
            Self::Tokens => tokens::execute(gemfile, output),
            Self::Show => show::execute(gemfile, output),
            Self::Check => check::execute(gemfile, output),
            Self::Fmt { check } => fmt::execute(gemfile, check, output),
        }
    }
}
