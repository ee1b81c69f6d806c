//! Lock file parser
//!
//! A recursive-descent parser over the token sequence produced by
//! [`crate::core::tokenizer`]. It reads one token at a time with a single
//! level of pushback and dispatches on top-level section headers. Nesting
//! inside a section is decided by indentation only: a name at
//! [`SPEC_INDENT`] declares a spec, a name at [`DEPENDENCY_INDENT`] belongs
//! to the spec declared just before it.
//!
//! The parser appends to a caller-owned [`Lockfile`] and never removes
//! anything from it.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::defaults::{DEPENDENCY_INDENT, SPEC_INDENT};
use crate::core::dependency::Dependency;
use crate::core::lockfile::Lockfile;
use crate::core::requirement::{Operator, Requirement};
use crate::core::source::{Source, SourceGroup};
use crate::core::spec::Platform;
use crate::core::token::{Token, TokenKind};
use crate::error::LockfileError;

/// Cursor over an immutable token sequence
pub struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    /// Whether the previous operation was a `get` that can be undone
    can_unget: bool,
    path: &'a Path,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], path: &'a Path) -> Self {
        Self {
            tokens,
            cursor: 0,
            can_unget: false,
            path,
        }
    }

    /// Parse every section into `lock`
    pub fn parse(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        while let Some(token) = self.get() {
            match token.kind {
                TokenKind::Section => self.parse_section(token, lock)?,
                // blank lines between sections
                TokenKind::Newline => {}
                _ => {
                    return Err(self.defect(
                        token,
                        &format!("{token} outside of any section"),
                    ))
                }
            }
        }
        Ok(())
    }

    fn parse_section(&mut self, header: &Token, lock: &mut Lockfile) -> Result<(), LockfileError> {
        type SectionParser<'p> = fn(&mut Parser<'p>, &mut Lockfile) -> Result<(), LockfileError>;

        let parse_body: SectionParser<'a> = match header.value.as_str() {
            "GEM" => Self::parse_gem,
            "GIT" => Self::parse_git,
            "PATH" => Self::parse_path,
            "PLATFORMS" => Self::parse_platforms,
            "DEPENDENCIES" => Self::parse_dependencies,
            other => {
                // headers such as `BUNDLED WITH` or `RUBY VERSION` span several tokens
                tracing::debug!(
                    "Skipping unknown section '{other}' at line {} of {}",
                    header.line,
                    self.path.display()
                );
                self.skip_to_section();
                return Ok(());
            }
        };

        tracing::debug!("Parsing {} section at line {}", header.value, header.line);
        self.expect(&[TokenKind::Newline], None)?;
        parse_body(self, lock)?;
        self.end_of_section()
    }

    // === Sections ===

    fn parse_gem(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        let remote = self.parse_remote()?;
        self.expect(&[TokenKind::Entry], Some("specs"))?;
        self.expect(&[TokenKind::Newline], None)?;

        let mut group = SourceGroup::new(Source::rubygems(remote));
        self.parse_specs(&mut group)?;
        lock.add_source(group);
        Ok(())
    }

    fn parse_git(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        let remote = self.parse_remote()?;
        self.expect(&[TokenKind::Entry], Some("revision"))?;
        let revision = self.expect(&[TokenKind::Text], None)?.value.clone();
        self.expect(&[TokenKind::Newline], None)?;
        let options = self.parse_options()?;

        let mut group = SourceGroup::new(Source::Git {
            remote,
            revision,
            options,
        });
        self.parse_specs(&mut group)?;
        lock.add_source(group);
        Ok(())
    }

    fn parse_path(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        let remote = self.parse_remote()?;
        let options = self.parse_options()?;

        let mut group = SourceGroup::new(Source::Path {
            path: remote.into(),
            options,
        });
        self.parse_specs(&mut group)?;
        lock.add_source(group);
        Ok(())
    }

    fn parse_platforms(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        while self.peek_is(TokenKind::Text) {
            let token = self.expect(&[TokenKind::Text], None)?;
            self.expect_line_end()?;
            lock.platforms.push(Platform::new(&token.value));
        }
        Ok(())
    }

    fn parse_dependencies(&mut self, lock: &mut Lockfile) -> Result<(), LockfileError> {
        while self.peek_is(TokenKind::Text) {
            let name = self.expect(&[TokenKind::Text], None)?;
            let mut dependency = Dependency::new(name.value.clone());

            if self.peek_is(TokenKind::LParen) {
                self.expect(&[TokenKind::LParen], None)?;
                dependency.requirements.extend(self.parse_requirements()?);
            }

            if self.peek_is(TokenKind::Bang) {
                let bang = self.expect(&[TokenKind::Bang], None)?;
                let (version, source) = self.find_pinned(lock, &name.value, bang)?;
                if dependency.requirements.is_empty() {
                    dependency.requirements.insert(Requirement::exact(version));
                }
                dependency.source = Some(source);
            }

            self.expect_line_end()?;
            lock.dependencies.register(dependency);
        }
        Ok(())
    }

    // === Shared grammar pieces ===

    /// `remote: <text> NEWLINE`
    fn parse_remote(&mut self) -> Result<String, LockfileError> {
        self.expect(&[TokenKind::Entry], Some("remote"))?;
        let remote = self.expect(&[TokenKind::Text], None)?.value.clone();
        self.expect(&[TokenKind::Newline], None)?;
        Ok(remote)
    }

    /// `name: value` entries up to and including `specs:`
    fn parse_options(&mut self) -> Result<BTreeMap<String, String>, LockfileError> {
        let mut options = BTreeMap::new();
        loop {
            let entry = self.expect(&[TokenKind::Entry], None)?;
            if entry.value == "specs" {
                self.expect(&[TokenKind::Newline], None)?;
                return Ok(options);
            }

            options.insert(entry.value.clone(), self.rest_of_line());
        }
    }

    /// Everything up to the next newline as written, e.g. `{a, b}.gemspec`
    ///
    /// Gaps between tokens are restored from their columns.
    fn rest_of_line(&mut self) -> String {
        let mut value = String::new();
        let mut end = None;
        while let Some(token) = self.get() {
            if token.is(TokenKind::Newline) {
                break;
            }
            if let Some(end) = end {
                value.push_str(&" ".repeat(token.column.saturating_sub(end)));
            }
            value.push_str(&token.value);
            // entry tokens drop their colon
            if token.is(TokenKind::Entry) {
                value.push(':');
            }
            end = Some(token.column + value_len(token));
        }
        value
    }

    /// Spec and dependency lines of a GEM, GIT or PATH section
    fn parse_specs(&mut self, group: &mut SourceGroup) -> Result<(), LockfileError> {
        let mut current: Option<usize> = None;

        while self.peek_is(TokenKind::Text) {
            let name = self.expect(&[TokenKind::Text], None)?;
            let next = self.expect(&[TokenKind::Newline, TokenKind::LParen], None)?;

            match (next.kind, name.column) {
                (TokenKind::Newline, DEPENDENCY_INDENT) => {
                    self.add_dependency(group, current, name, Dependency::new(name.value.clone()))?;
                }
                (TokenKind::Newline, _) => {
                    return Err(self.error(
                        name,
                        &format!(
                            "Spec '{}' at column {} has no version; expected a dependency at column {DEPENDENCY_INDENT}",
                            name.value, name.column
                        ),
                    ));
                }
                (_, SPEC_INDENT) => {
                    let version = self.expect(&[TokenKind::Text], None)?;
                    self.expect(&[TokenKind::RParen], None)?;
                    self.expect_line_end()?;

                    let (version, platform) = split_platform(&version.value);
                    current = Some(group.add_spec(name.value.clone(), version, platform));
                }
                _ => {
                    let requirements = self.parse_requirements()?;
                    self.expect_line_end()?;
                    let dependency = Dependency::with_requirements(name.value.clone(), requirements);
                    self.add_dependency(group, current, name, dependency)?;
                }
            }
        }
        Ok(())
    }

    /// `op version (, op version)* )`, after the opening parenthesis
    fn parse_requirements(&mut self) -> Result<Vec<Requirement>, LockfileError> {
        let mut requirements = Vec::new();
        loop {
            let op = self.expect(&[TokenKind::Requirement], None)?;
            let version = self.expect(&[TokenKind::Text], None)?;
            let operator: Operator = op
                .value
                .parse()
                .map_err(|message: String| self.defect(op, &message))?;
            requirements.push(Requirement::new(operator, version.value.clone()));

            let separator = self.expect(&[TokenKind::Comma, TokenKind::RParen], None)?;
            if separator.is(TokenKind::RParen) {
                return Ok(requirements);
            }
        }
    }

    fn add_dependency(
        &self,
        group: &mut SourceGroup,
        current: Option<usize>,
        name: &Token,
        dependency: Dependency,
    ) -> Result<(), LockfileError> {
        match current {
            Some(spec) if group.add_dependency(spec, dependency) => Ok(()),
            _ => Err(self.error(
                name,
                &format!("Dependency '{}' is not nested under a spec", name.value),
            )),
        }
    }

    /// Version and source of a spec provided by a previously parsed git or path source
    fn find_pinned(
        &self,
        lock: &Lockfile,
        name: &str,
        bang: &Token,
    ) -> Result<(String, Source), LockfileError> {
        lock.sources
            .iter()
            .filter(|group| group.source.is_pinned())
            .find_map(|group| {
                group
                    .find(name)
                    .map(|spec| (spec.version.clone(), group.source.clone()))
            })
            .ok_or_else(|| {
                self.error(
                    bang,
                    &format!(
                        "Dependency '{name}' is marked with '!' but no GIT or PATH section provides it"
                    ),
                )
            })
    }

    // === Cursor ===

    fn get(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        self.can_unget = true;
        Some(token)
    }

    /// Push back the most recently consumed token; one level only
    fn unget(&mut self) {
        debug_assert!(self.can_unget, "unget without a preceding get");
        if self.can_unget {
            self.cursor -= 1;
            self.can_unget = false;
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.is(kind))
    }

    /// Take the next token, failing unless it has one of `kinds` and, if
    /// given, the expected `value`
    fn expect(
        &mut self,
        kinds: &[TokenKind],
        value: Option<&str>,
    ) -> Result<&'a Token, LockfileError> {
        let expected = describe_expected(kinds, value);
        let Some(token) = self.get() else {
            let message = format!("Unexpected end of file, expected {expected}");
            return Err(match self.tokens.last() {
                Some(last) => self.error(last, &message),
                None => LockfileError::Parse {
                    message,
                    line: 1,
                    column: 0,
                    path: self.path.to_path_buf(),
                },
            });
        };

        let kind_ok = kinds.is_empty() || kinds.contains(&token.kind);
        let value_ok = value.map_or(true, |v| token.value == v);
        if kind_ok && value_ok {
            return Ok(token);
        }

        self.unget();
        Err(self.error(token, &format!("Unexpected {token}, expected {expected}")))
    }

    /// A newline, or the end of the file
    fn expect_line_end(&mut self) -> Result<(), LockfileError> {
        if self.peek().is_some() {
            self.expect(&[TokenKind::Newline], None)?;
        }
        Ok(())
    }

    /// A section body must stop at a blank line, another section or the end
    fn end_of_section(&mut self) -> Result<(), LockfileError> {
        match self.peek() {
            Some(t) if !t.is(TokenKind::Newline) && !t.is(TokenKind::Section) => self
                .expect(
                    &[TokenKind::Text, TokenKind::Newline, TokenKind::Section],
                    None,
                )
                .map(|_| ()),
            _ => Ok(()),
        }
    }

    fn skip_to_section(&mut self) {
        while self.peek().is_some_and(|t| !t.is(TokenKind::Section)) {
            self.cursor += 1;
        }
        self.can_unget = false;
    }

    fn error(&self, token: &Token, message: &str) -> LockfileError {
        LockfileError::Parse {
            message: message.to_string(),
            line: token.line,
            column: token.column,
            path: self.path.to_path_buf(),
        }
    }

    fn defect(&self, token: &Token, message: &str) -> LockfileError {
        LockfileError::Defect {
            message: format!("{message} at line {}, column {}", token.line, token.column),
            path: self.path.to_path_buf(),
        }
    }
}

fn describe_expected(kinds: &[TokenKind], value: Option<&str>) -> String {
    let kinds = kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(" or ");
    match value {
        Some(value) if kinds.is_empty() => format!("{value:?}"),
        Some(value) => format!("{kinds} {value:?}"),
        None => kinds,
    }
}

/// Number of source bytes a token was lexed from
fn value_len(token: &Token) -> usize {
    token.value.len() + usize::from(token.is(TokenKind::Entry))
}

/// Split `1.4.2-x86-mingw32` into version and platform at the first `-`
fn split_platform(full_version: &str) -> (&str, Platform) {
    match full_version.split_once('-') {
        Some((version, platform)) => (version, Platform::new(platform)),
        None => (full_version, Platform::Generic),
    }
}
