//! Infrastructure layer
//!
//! Handles all I/O operations. This module is the only place where side
//! effects occur.

pub mod filesystem;
