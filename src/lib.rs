//! Gemlock - Gemfile.lock reader and canonical writer
//!
//! This library reads lock files that record the outcome of a Ruby
//! dependency resolution and writes resolved graphs back in canonical form.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Tokenizer, parser, writer and the lock file model (no I/O)
//! - [`infra`] - Infrastructure layer (filesystem)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
