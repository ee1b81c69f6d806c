//! Source groups
//!
//! Every resolved spec comes from exactly one source: a remote registry, a
//! git checkout pinned at a revision, or a local directory. A
//! [`SourceGroup`] owns the specs a source provides.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::dependency::Dependency;
use crate::core::spec::{Platform, Spec};

/// Where a set of specs was resolved from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    /// Remote registry, identified by its URI
    Rubygems { remote: String },

    /// Git repository pinned at a revision
    Git {
        remote: String,
        revision: String,
        /// Extra entries such as `branch`, `ref`, `tag`, `glob`, `submodules`
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        options: BTreeMap<String, String>,
    },

    /// Local directory, relative to the lock file's directory when possible
    Path {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        options: BTreeMap<String, String>,
    },
}

impl Source {
    pub fn rubygems(remote: impl Into<String>) -> Self {
        Self::Rubygems {
            remote: remote.into(),
        }
    }

    pub fn git(remote: impl Into<String>, revision: impl Into<String>) -> Self {
        Self::Git {
            remote: remote.into(),
            revision: revision.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path {
            path: path.into(),
            options: BTreeMap::new(),
        }
    }

    /// Whether specs from this source pin their own version
    ///
    /// Top-level dependencies on such specs are written with a trailing `!`.
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Git { .. } | Self::Path { .. })
    }

    /// Section header this source is written under
    pub fn section(&self) -> &'static str {
        match self {
            Self::Rubygems { .. } => "GEM",
            Self::Git { .. } => "GIT",
            Self::Path { .. } => "PATH",
        }
    }

    /// Path of a path source resolved against the lock file's directory
    pub fn expanded_path(&self, lockfile_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Path { path, .. } => Some(lockfile_dir.join(path)),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rubygems { remote } => write!(f, "rubygems repository {remote}"),
            Self::Git {
                remote, revision, ..
            } => write!(f, "{remote} (at {revision})"),
            Self::Path { path, .. } => write!(f, "source at {}", path.display()),
        }
    }
}

/// A source and the specs it provides, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub source: Source,
    pub specs: Vec<Spec>,
}

impl SourceGroup {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            specs: Vec::new(),
        }
    }

    /// Register a spec provided by this source, returning its index
    pub fn add_spec(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        platform: Platform,
    ) -> usize {
        self.specs.push(Spec::new(name, version, platform));
        self.specs.len() - 1
    }

    /// Attach a dependency to a previously added spec
    ///
    /// Returns `false` when `spec` is not a valid index.
    pub fn add_dependency(&mut self, spec: usize, dependency: Dependency) -> bool {
        match self.specs.get_mut(spec) {
            Some(spec) => {
                spec.dependencies.push(dependency);
                true
            }
            None => false,
        }
    }

    /// Find a spec by name
    pub fn find(&self, name: &str) -> Option<&Spec> {
        self.specs.iter().find(|spec| spec.name == name)
    }
}
