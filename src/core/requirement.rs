//! Version requirements
//!
//! A requirement pairs an operator from a closed set with a version string.
//! Versions are kept verbatim: the lock file pins what the resolver chose and
//! gemlock never compares versions itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Requirement operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    /// `~>`, the pessimistic operator
    #[serde(rename = "~>")]
    Pessimistic,
}

impl Operator {
    /// All operators, in canonical order
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::Lt,
        Self::GtEq,
        Self::LtEq,
        Self::Pessimistic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Pessimistic => "~>",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown requirement operator '{s}'"))
    }
}

/// An operator and version pair, e.g. `~> 1.2`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Requirement {
    pub op: Operator,
    pub version: String,
}

impl Requirement {
    pub fn new(op: Operator, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }

    /// `= version`, used for dependencies pinned by a git or path source
    pub fn exact(version: impl Into<String>) -> Self {
        Self::new(Operator::Eq, version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.version)
    }
}
