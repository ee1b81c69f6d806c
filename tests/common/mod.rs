//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a test project whose `Gemfile.lock` has the given content
    #[allow(dead_code)]
    pub fn with_lockfile(content: &str) -> Self {
        let project = Self::new();
        project.create_file("Gemfile", "source 'http://rubygems.org'\n");
        project.create_file("Gemfile.lock", content);
        project
    }

    /// Get the path to the test project directory
    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Path of the project's `Gemfile`
    #[allow(dead_code)]
    pub fn gemfile(&self) -> PathBuf {
        self.dir.path().join("Gemfile")
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the gemlock binary in the project directory
    #[allow(dead_code)]
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gemlock"))
            .current_dir(self.dir.path())
            .env_remove("GEMLOCK_GEMFILE")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute gemlock")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// A canonical lock file covering every section kind
#[allow(dead_code)]
pub const SAMPLE_LOCKFILE: &str = "\
PATH
  remote: vendor/foo
  specs:
    foo (1.0)
      rake

GIT
  remote: git://github.com/rails/rails.git
  revision: 6f1b8b2
  branch: main
  specs:
    rails (3.0.0)
      rack (~> 1.2)

GEM
  remote: http://rubygems.org/
  specs:
    rack (1.2.1)
    rake (0.8.7)

PLATFORMS
  ruby

DEPENDENCIES
  foo!
  rails!
  rake (~> 0.8)
";

/// The same graph as [`SAMPLE_LOCKFILE`] written out of canonical order
#[allow(dead_code)]
pub const UNSORTED_LOCKFILE: &str = "\
GEM
  remote: http://rubygems.org/
  specs:
    rake (0.8.7)
    rack (1.2.1)

GIT
  remote: git://github.com/rails/rails.git
  revision: 6f1b8b2
  branch: main
  specs:
    rails (3.0.0)
      rack (~> 1.2)

PATH
  remote: vendor/foo
  specs:
    foo (1.0)
      rake

PLATFORMS
  ruby

DEPENDENCIES
  rake (~> 0.8)
  rails!
  foo!
";
