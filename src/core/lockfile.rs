//! Lock file handling
//!
//! The lock file (`Gemfile.lock`) records the exact specs a resolution chose,
//! the sources they came from, the platforms they were resolved for and the
//! top-level dependencies, so that repeated installs are reproducible.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::LOCKFILE_EXTENSION;
use crate::core::dependency::DependencySet;
use crate::core::parser::Parser;
use crate::core::source::SourceGroup;
use crate::core::spec::Platform;
use crate::core::tokenizer::Tokenizer;
use crate::core::writer::{Request, ResolvedGraph, Writer};
use crate::error::{GemlockError, LockfileError};
use crate::infra::filesystem;

/// Parsed lock file contents
///
/// The parser appends to these containers; they are owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    /// Source groups in the order their sections appear
    pub sources: Vec<SourceGroup>,

    /// Platforms in document order
    pub platforms: Vec<Platform>,

    /// Top-level declared dependencies
    pub dependencies: DependencySet,
}

impl Lockfile {
    /// Parse lock file text
    ///
    /// `None` means the lock file does not exist and yields an empty lock.
    pub fn parse(text: Option<&str>, path: &Path) -> Result<Self, LockfileError> {
        let tokens = Tokenizer::new()?.tokenize(text, path)?;
        let mut lock = Self::default();
        Parser::new(&tokens, path).parse(&mut lock)?;

        tracing::debug!(
            "Parsed {}: {} sources, {} specs, {} platforms, {} dependencies",
            path.display(),
            lock.sources.len(),
            lock.spec_count(),
            lock.platforms.len(),
            lock.dependencies.len()
        );
        Ok(lock)
    }

    /// Load the lock file that belongs to `gemfile`
    ///
    /// A missing lock file is not an error and yields an empty lock.
    pub fn load(gemfile: &Path) -> Result<Self, GemlockError> {
        let path = lockfile_path(gemfile);
        let text = filesystem::read_file_if_exists(&path)?;
        Ok(Self::parse(text.as_deref(), &path)?)
    }

    /// Write `graph` as the lock file of `gemfile`, replacing its contents
    pub fn save(graph: &ResolvedGraph, gemfile: &Path) -> Result<PathBuf, GemlockError> {
        let path = lockfile_path(gemfile);
        let text = Writer::new(lockfile_dir(&path)).write(graph);
        filesystem::write_file(&path, &text)?;
        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Add a source group, merging it into an existing group for the same source
    pub fn add_source(&mut self, group: SourceGroup) {
        match self.sources.iter_mut().find(|g| g.source == group.source) {
            Some(existing) => existing.specs.extend(group.specs),
            None => self.sources.push(group),
        }
    }

    /// Total number of specs across all sources
    pub fn spec_count(&self) -> usize {
        self.sources.iter().map(|g| g.specs.len()).sum()
    }

    /// Whether nothing was parsed
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.platforms.is_empty() && self.dependencies.is_empty()
    }

    /// The resolved graph this lock file describes, in document order
    pub fn to_graph(&self) -> ResolvedGraph {
        let requests = self
            .sources
            .iter()
            .flat_map(|group| {
                group
                    .specs
                    .iter()
                    .map(|spec| Request::new(spec.clone(), group.source.clone()))
            })
            .collect();
        ResolvedGraph {
            requests,
            dependencies: self.dependencies.iter().cloned().collect(),
            platforms: self.platforms.clone(),
        }
    }
}

/// Path of the lock file for a dependency declaration file
///
/// `Gemfile` becomes `Gemfile.lock` in the same directory.
pub fn lockfile_path(gemfile: &Path) -> PathBuf {
    let mut name = gemfile.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(LOCKFILE_EXTENSION);
    gemfile.with_file_name(name)
}

/// Directory path sources are written relative to
pub fn lockfile_dir(lockfile: &Path) -> &Path {
    match lockfile.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
