//! Output formatting
//!
//! This module decides how much the CLI prints and in which format, and
//! renders errors for the user.

use serde_json::json;

/// Output settings taken from the global flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub quiet: bool,
    pub json: bool,
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Default log level for the tracing subscriber; `RUST_LOG` adds to it
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Print a human-readable status line unless quiet or in JSON mode
    pub fn status(&self, prefix: &str, message: &str) {
        if !self.quiet && !self.json {
            println!("{prefix} {message}");
        }
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error, config: &OutputConfig) {
    if config.json {
        let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        eprintln!(
            "{}",
            json!({ "error": error.to_string(), "causes": causes })
        );
        return;
    }

    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(OutputConfig::new(false, false, 0).log_level(), tracing::Level::WARN);
        assert_eq!(OutputConfig::new(false, false, 1).log_level(), tracing::Level::INFO);
        assert_eq!(OutputConfig::new(false, false, 2).log_level(), tracing::Level::DEBUG);
        assert_eq!(OutputConfig::new(false, false, 9).log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(OutputConfig::new(true, false, 2).log_level(), tracing::Level::ERROR);
    }
}
