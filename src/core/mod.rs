//! Core lock file logic
//!
//! This module contains the tokenizer, parser and writer plus the domain
//! model they share. It has NO I/O operations - those belong in
//! [`crate::infra`], except for [`lockfile::Lockfile::load`] and
//! [`lockfile::Lockfile::save`] which delegate to it.
//!
//! # Submodules
//!
//! - [`token`] - Token kinds and positions
//! - [`tokenizer`] - Text to token sequence
//! - [`parser`] - Token sequence to [`lockfile::Lockfile`]
//! - [`writer`] - Resolved graph to canonical text
//! - [`lockfile`] - Parsed contents, load and save
//! - [`requirement`] - Requirement operators and versions
//! - [`dependency`] - Dependencies and the top-level dependency set
//! - [`spec`] - Resolved specs and platforms
//! - [`source`] - Registry, git and path source groups

pub mod dependency;
pub mod lockfile;
pub mod parser;
pub mod requirement;
pub mod source;
pub mod spec;
pub mod token;
pub mod tokenizer;
pub mod writer;
