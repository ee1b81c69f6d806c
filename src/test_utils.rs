//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::Path;

    use proptest::prelude::*;

    use crate::core::dependency::Dependency;
    use crate::core::requirement::{Operator, Requirement};
    use crate::core::source::Source;
    use crate::core::spec::{Platform, Spec};
    use crate::core::writer::{Request, ResolvedGraph};

    /// Generate a valid gem name (alphanumeric with hyphens and underscores,
    /// sometimes capitalized like `RedCloth`)
    pub fn gem_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_-]{0,15}"
    }

    /// Generate a gem version string (no platform suffix)
    pub fn gem_version() -> impl Strategy<Value = String> {
        "[0-9]{1,2}(\\.[0-9]{1,2}){0,3}(\\.(pre|rc|beta)[0-9]?)?"
    }

    /// Generate a platform, generic or concrete
    pub fn platform() -> impl Strategy<Value = Platform> {
        prop_oneof![
            3 => Just(Platform::Generic),
            1 => Just(Platform::new("x86_64-linux")),
            1 => Just(Platform::new("java")),
            1 => Just(Platform::new("x86-mingw32")),
            1 => Just(Platform::new("universal-darwin-10")),
        ]
    }

    /// Generate a requirement with any operator of the closed set
    pub fn requirement() -> impl Strategy<Value = Requirement> {
        (prop::sample::select(Operator::ALL.to_vec()), gem_version())
            .prop_map(|(op, version)| Requirement::new(op, version))
    }

    /// Generate a set of zero to three requirements
    pub fn requirements() -> impl Strategy<Value = BTreeSet<Requirement>> {
        prop::collection::btree_set(requirement(), 0..3)
    }

    /// Generate an option value such as `{a, b}.gemspec`, with inner commas
    /// and runs of spaces but no surrounding whitespace
    pub fn option_value() -> impl Strategy<Value = String> {
        "[a-z{}*.]{1,6}(,? {1,2}[a-z{}*.]{1,6}){0,2}"
    }

    /// Generate source options; `branch` only applies to git sources
    fn options(git: bool) -> impl Strategy<Value = BTreeMap<String, String>> {
        (
            prop::option::of("[a-z]{3,8}"),
            prop::option::of(option_value()),
        )
            .prop_map(move |(branch, glob)| {
                let mut options = BTreeMap::new();
                if let Some(branch) = branch.filter(|_| git) {
                    options.insert("branch".to_string(), branch);
                }
                if let Some(glob) = glob {
                    options.insert("glob".to_string(), glob);
                }
                options
            })
    }

    /// Generate a source of any kind
    ///
    /// Path sources are relative, absolute under `/app` or absolute elsewhere.
    pub fn source() -> impl Strategy<Value = Source> {
        let path = prop_oneof![
            "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            "/app(/[a-z]{1,8}){0,2}",
            "/opt/[a-z]{1,8}",
        ];
        prop_oneof![
            "https?://[a-z]{3,10}\\.org/".prop_map(Source::rubygems),
            (
                "git://github\\.com/[a-z]{3,8}/[a-z]{3,8}\\.git",
                "[0-9a-f]{7,40}",
                options(true),
            )
                .prop_map(|(remote, revision, options)| Source::Git {
                    remote,
                    revision,
                    options,
                }),
            (path, options(false)).prop_map(|(path, options)| Source::Path {
                path: path.into(),
                options,
            }),
        ]
    }

    /// A source with its path resolved against `lockfile_dir`, so that sources
    /// written relative and read back compare equal
    pub fn resolved(source: &Source, lockfile_dir: &Path) -> Source {
        match (source, source.expanded_path(lockfile_dir)) {
            (Source::Path { options, .. }, Some(path)) => Source::Path {
                path,
                options: options.clone(),
            },
            _ => source.clone(),
        }
    }

    /// Generate a spec with uniquely named dependencies
    pub fn spec(name: String) -> impl Strategy<Value = Spec> {
        (
            gem_version(),
            platform(),
            prop::collection::btree_map(gem_name(), requirements(), 0..4),
        )
            .prop_map(move |(version, platform, dependencies)| Spec {
                name: name.clone(),
                version,
                platform,
                dependencies: dependencies
                    .into_iter()
                    .map(|(name, requirements)| Dependency::with_requirements(name, requirements))
                    .collect(),
            })
    }

    /// Generate a resolved graph over one to three sources
    ///
    /// Spec names are unique across the graph and no two sources name the
    /// same directory relative to `/app`. Top-level dependencies on
    /// specs from git or path sources are pinned to them.
    pub fn resolved_graph() -> impl Strategy<Value = ResolvedGraph> {
        let names = prop::collection::btree_set(gem_name(), 0..10);
        let sources = prop::collection::vec(source(), 1..4);

        (names, sources)
            .prop_flat_map(|(names, mut sources)| {
                // `/app/foo` and `foo` are the same directory once written
                let mut seen = Vec::new();
                sources.retain(|source| {
                    let key = resolved(source, Path::new("/app"));
                    let fresh = !seen.contains(&key);
                    seen.push(key);
                    fresh
                });
                let specs: Vec<_> = names
                    .into_iter()
                    .map(|name| (spec(name), any::<prop::sample::Index>(), any::<u8>()))
                    .collect();
                (specs, Just(sources))
            })
            .prop_map(|(specs, sources)| {
                let mut requests = Vec::new();
                let mut dependencies = BTreeMap::new();

                for (spec, source, declare) in specs {
                    let source = source.get(&sources).clone();
                    match declare % 3 {
                        0 => {}
                        _ if source.is_pinned() => {
                            let dep = Dependency::pinned(&spec.name, &spec.version, source.clone());
                            dependencies.insert(spec.name.clone(), dep);
                        }
                        1 => {
                            dependencies.insert(spec.name.clone(), Dependency::new(&spec.name));
                        }
                        _ => {
                            let dep = Dependency::with_requirements(
                                &spec.name,
                                [Requirement::exact(&spec.version)],
                            );
                            dependencies.insert(spec.name.clone(), dep);
                        }
                    }
                    requests.push(Request::new(spec, source));
                }

                ResolvedGraph {
                    requests,
                    dependencies: dependencies.into_values().collect(),
                    platforms: Vec::new(),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_gem_name_generator(name in gem_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.starts_with(|c: char| c.is_ascii_alphabetic()));
        }

        #[test]
        fn test_gem_version_generator(version in gem_version()) {
            prop_assert!(!version.contains('-'));
            prop_assert!(!version.contains(char::is_whitespace));
        }

        #[test]
        fn test_option_value_generator(value in option_value()) {
            prop_assert_eq!(value.trim(), value.as_str());
            prop_assert!(!value.contains('\n'));
        }

        #[test]
        fn test_graph_spec_names_are_unique(graph in resolved_graph()) {
            let mut names: Vec<_> = graph.requests.iter().map(|r| &r.spec.name).collect();
            let total = names.len();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), total);
        }
    }
}
