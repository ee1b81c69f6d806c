//! Configuration and constants
//!
//! Compile-time defaults live in [`defaults`]. Runtime options come from the
//! command line (see [`crate::cli::Cli`]).

pub mod defaults;
