//! Gemlock CLI - Gemfile.lock reader and canonical writer
//!
//! Entry point for the gemlock command-line application.

use anyhow::Result;
use clap::Parser;

use gemlock::cli::output::{display_error, OutputConfig};
use gemlock::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);

    // Logs go to stderr so that stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.run(&output_config) {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e, &output_config);
            std::process::exit(1);
        }
    }
}
