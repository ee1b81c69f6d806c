//! Dependencies and the dependency set
//!
//! A dependency names a package and constrains it with zero or more
//! requirements, or marks it as pinned by a git or path source.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::requirement::Requirement;
use crate::core::source::Source;

/// A named dependency with its requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,

    /// Requirements; the set order is the serialization order
    #[serde(default)]
    pub requirements: BTreeSet<Requirement>,

    /// Git or path source pinning this dependency's version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl Dependency {
    /// An unconstrained dependency
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: BTreeSet::new(),
            source: None,
        }
    }

    pub fn with_requirements(
        name: impl Into<String>,
        requirements: impl IntoIterator<Item = Requirement>,
    ) -> Self {
        Self {
            name: name.into(),
            requirements: requirements.into_iter().collect(),
            source: None,
        }
    }

    /// A dependency whose version is pinned by `source`
    pub fn pinned(name: impl Into<String>, version: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            requirements: BTreeSet::from([Requirement::exact(version)]),
            source: Some(source),
        }
    }

    /// Whether the version comes from a git or path source
    pub fn is_pinned(&self) -> bool {
        self.source.as_ref().is_some_and(Source::is_pinned)
    }

    /// Requirements joined as `op version, op version`
    pub fn requirement_list(&self) -> String {
        self.requirements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.requirements.is_empty() {
            write!(f, " ({})", self.requirement_list())?;
        }
        Ok(())
    }
}

/// The externally owned set of top-level dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet {
    dependencies: Vec<Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dependency
    ///
    /// Registering a name twice merges the requirements into the first entry.
    pub fn register(&mut self, dependency: Dependency) {
        if let Some(existing) = self
            .dependencies
            .iter_mut()
            .find(|d| d.name == dependency.name)
        {
            tracing::debug!("Merging duplicate dependency '{}'", dependency.name);
            existing.requirements.extend(dependency.requirements);
            if existing.source.is_none() {
                existing.source = dependency.source;
            }
            return;
        }
        self.dependencies.push(dependency);
    }

    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<T: IntoIterator<Item = Dependency>>(iter: T) -> Self {
        let mut set = Self::new();
        for dependency in iter {
            set.register(dependency);
        }
        set
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}
