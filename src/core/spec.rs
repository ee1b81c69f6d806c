//! Resolved specs and platforms

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::defaults::GENERIC_PLATFORM;
use crate::core::dependency::Dependency;

/// Platform a spec was built for
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    /// Platform independent (`ruby`)
    #[default]
    Generic,
    /// A concrete platform such as `x86_64-linux` or `java`
    Concrete(String),
}

impl Platform {
    /// Parse a platform name, mapping the generic name to [`Platform::Generic`]
    pub fn new(name: &str) -> Self {
        if name == GENERIC_PLATFORM {
            Self::Generic
        } else {
            Self::Concrete(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Generic => GENERIC_PLATFORM,
            Self::Concrete(name) => name,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

/// A resolved package: name, version, platform and its own dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Spec {
    pub fn new(name: impl Into<String>, version: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            platform,
            dependencies: Vec::new(),
        }
    }

    /// Add a dependency, builder style
    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Version as written in a spec line: `1.4.2` or `1.4.2-x86-mingw32`
    pub fn full_version(&self) -> String {
        match &self.platform {
            Platform::Generic => self.version.clone(),
            Platform::Concrete(platform) => format!("{}-{platform}", self.version),
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.full_version())
    }
}
