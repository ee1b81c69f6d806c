//! Canonical lock file writer
//!
//! Serializes a resolved graph into lock file text. Specs within a source
//! and declared dependencies are sorted, so their order in the graph does
//! not matter; sources and platforms keep first-seen order. Sections are written as PATH, GIT, GEM,
//! PLATFORMS and DEPENDENCIES, separated by blank lines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEPENDENCY_INDENT, ENTRY_INDENT, SPEC_INDENT};
use crate::core::dependency::Dependency;
use crate::core::requirement::Requirement;
use crate::core::source::Source;
use crate::core::spec::{Platform, Spec};

/// A chosen spec and the source it was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub spec: Spec,
    pub source: Source,
}

impl Request {
    pub fn new(spec: Spec, source: Source) -> Self {
        Self { spec, source }
    }
}

/// The output of a resolution: every chosen spec plus the declared dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGraph {
    /// Requests in resolution order
    pub requests: Vec<Request>,
    /// Top-level declared dependencies
    pub dependencies: Vec<Dependency>,
    /// Platforms the resolution targeted beyond those of its specs
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

/// Specs of one source, in first-seen order
struct Group<'g> {
    source: &'g Source,
    specs: Vec<&'g Spec>,
}

/// Lock file writer
#[derive(Debug, Clone)]
pub struct Writer {
    lockfile_dir: PathBuf,
}

impl Writer {
    /// `lockfile_dir` is the directory path sources are written relative to
    pub fn new(lockfile_dir: impl Into<PathBuf>) -> Self {
        Self {
            lockfile_dir: lockfile_dir.into(),
        }
    }

    /// Serialize `graph` into lock file text
    pub fn write(&self, graph: &ResolvedGraph) -> String {
        tracing::debug!(
            "Writing lock file for {} requests and {} dependencies",
            graph.requests.len(),
            graph.dependencies.len()
        );

        let mut remaining = group_by_source(&graph.requests);
        let mut sections = Vec::new();

        for group in take_groups(&mut remaining, |s| matches!(s, Source::Path { .. })) {
            sections.push(self.source_section(&group));
        }
        for group in take_groups(&mut remaining, |s| matches!(s, Source::Git { .. })) {
            sections.push(self.source_section(&group));
        }
        for group in &remaining {
            sections.push(self.source_section(group));
        }

        sections.push(platforms_section(graph));
        sections.push(dependencies_section(graph));
        sections.join("\n")
    }

    fn source_section(&self, group: &Group<'_>) -> String {
        let mut lines = vec![group.source.section().to_string()];
        let options = match group.source {
            Source::Rubygems { remote } => {
                lines.push(entry("remote", remote));
                None
            }
            Source::Git {
                remote,
                revision,
                options,
            } => {
                lines.push(entry("remote", remote));
                lines.push(entry("revision", revision));
                Some(options)
            }
            Source::Path { path, options } => {
                lines.push(entry("remote", &self.relative_path(path)));
                Some(options)
            }
        };
        lines.extend(options.into_iter().flatten().map(|(name, value)| entry(name, value)));
        lines.push(format!("{}specs:", " ".repeat(ENTRY_INDENT)));

        let mut specs = group.specs.clone();
        specs.sort_by(|a, b| {
            (&a.name, &a.version, &a.platform).cmp(&(&b.name, &b.version, &b.platform))
        });
        for spec in specs {
            write_spec(&mut lines, spec);
        }
        end_lines(&lines)
    }

    /// Path relative to the lock file's directory when it is a descendant of it
    fn relative_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.lockfile_dir) {
            Ok(relative) if path.is_absolute() => {
                if relative.as_os_str().is_empty() {
                    ".".to_string()
                } else {
                    relative.display().to_string()
                }
            }
            _ => path.display().to_string(),
        }
    }
}

fn group_by_source(requests: &[Request]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<&Source, usize> = HashMap::new();

    for request in requests {
        let slot = *index.entry(&request.source).or_insert_with(|| {
            groups.push(Group {
                source: &request.source,
                specs: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].specs.push(&request.spec);
    }
    groups
}

/// Remove and return the groups whose source matches `predicate`
fn take_groups<'g>(
    remaining: &mut Vec<Group<'g>>,
    predicate: impl Fn(&Source) -> bool,
) -> Vec<Group<'g>> {
    let (taken, kept) = std::mem::take(remaining)
        .into_iter()
        .partition(|group| predicate(group.source));
    *remaining = kept;
    taken
}

/// `  name: value` under a source header
fn entry(name: &str, value: &str) -> String {
    format!("{}{name}: {value}", " ".repeat(ENTRY_INDENT))
}

/// Join lines, terminating each with a newline
fn end_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn write_spec(lines: &mut Vec<String>, spec: &Spec) {
    lines.push(format!(
        "{}{} ({})",
        " ".repeat(SPEC_INDENT),
        spec.name,
        spec.full_version()
    ));

    let mut dependencies: Vec<&Dependency> = spec.dependencies.iter().collect();
    dependencies.sort_by(|a, b| a.name.cmp(&b.name));
    for dependency in dependencies {
        lines.push(format!("{}{dependency}", " ".repeat(DEPENDENCY_INDENT)));
    }
}

/// Distinct platforms in first-seen order, explicit ones first; the generic
/// platform is left out once two or more platforms are present
fn platforms_section(graph: &ResolvedGraph) -> String {
    let mut platforms: Vec<&Platform> = Vec::new();
    let seen = graph
        .platforms
        .iter()
        .chain(graph.requests.iter().map(|r| &r.spec.platform));
    for platform in seen {
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    if platforms.len() > 1 {
        platforms.retain(|p| !p.is_generic());
    }

    let mut lines = vec!["PLATFORMS".to_string()];
    lines.extend(
        platforms
            .into_iter()
            .map(|platform| format!("{}{platform}", " ".repeat(ENTRY_INDENT))),
    );
    end_lines(&lines)
}

fn dependencies_section(graph: &ResolvedGraph) -> String {
    let mut dependencies: Vec<&Dependency> = graph.dependencies.iter().collect();
    dependencies.sort_by(|a, b| a.name.cmp(&b.name));

    let indent = " ".repeat(ENTRY_INDENT);
    let mut lines = vec!["DEPENDENCIES".to_string()];
    for dependency in dependencies {
        let line = if !dependency.is_pinned() {
            format!("{indent}{dependency}")
        } else if implied_by_source(graph, dependency) {
            format!("{indent}{}!", dependency.name)
        } else {
            format!("{indent}{dependency}!")
        };
        lines.push(line);
    }
    end_lines(&lines)
}

/// Whether a pinned dependency's requirements say no more than `= <version of
/// the pinning spec>`, so that `name!` alone reproduces them
fn implied_by_source(graph: &ResolvedGraph, dependency: &Dependency) -> bool {
    if dependency.requirements.is_empty() {
        return true;
    }
    graph
        .requests
        .iter()
        .filter(|r| Some(&r.source) == dependency.source.as_ref())
        .find(|r| r.spec.name == dependency.name)
        .is_some_and(|r| {
            dependency.requirements.len() == 1
                && dependency
                    .requirements
                    .contains(&Requirement::exact(r.spec.version.clone()))
        })
}
