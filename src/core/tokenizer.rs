//! Lock file tokenizer
//!
//! Turns lock file text into a flat [`Token`] sequence in a single batch
//! pass. The lexical rules are an ordered list of anchored matchers tried
//! left to right at each position; the first one that matches wins.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::defaults::CONFLICT_MARKER_LEN;
use crate::core::token::{Token, TokenKind};
use crate::error::LockfileError;

/// A lexical rule, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    ConflictMarker,
    Newline,
    Uppercase,
    Entry,
    Punctuation,
    Requirement,
    Text,
}

#[derive(Debug)]
struct Matcher {
    rule: Rule,
    pattern: Regex,
}

/// Ordered lexical rules for the lock file grammar
#[derive(Debug)]
pub struct Tokenizer {
    whitespace: Regex,
    text_tail: Regex,
    matchers: Vec<Matcher>,
}

impl Tokenizer {
    /// Compile the lexical rules
    pub fn new() -> Result<Self, LockfileError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| LockfileError::Defect {
                message: format!("invalid lexical rule '{pattern}': {e}"),
                path: PathBuf::new(),
            })
        };

        let conflict_marker = format!("^[<|=>]{{{CONFLICT_MARKER_LEN}}}");
        let rules = [
            (Rule::ConflictMarker, conflict_marker.as_str()),
            (Rule::Newline, r"^\n"),
            (Rule::Uppercase, r"^[A-Z]+"),
            (Rule::Entry, r"^([a-z_]+):\s"),
            (Rule::Punctuation, r"^[(),!]"),
            (Rule::Requirement, r"^(?:<=|>=|~>|!=|=|<|>)"),
            (Rule::Text, r"^[^\s),!]+"),
        ];

        let mut matchers = Vec::with_capacity(rules.len());
        for (rule, pattern) in rules {
            matchers.push(Matcher {
                rule,
                pattern: compile(pattern)?,
            });
        }

        Ok(Self {
            whitespace: compile(r"^[^\S\n]+")?,
            text_tail: compile(r"^[^\s),!]*")?,
            matchers,
        })
    }

    /// Tokenize lock file contents
    ///
    /// `None` stands for a lock file that does not exist yet and yields no
    /// tokens. `path` is only used for error reporting.
    pub fn tokenize(&self, input: Option<&str>, path: &Path) -> Result<Vec<Token>, LockfileError> {
        let Some(text) = input else {
            tracing::debug!("No lock file at {}, nothing to tokenize", path.display());
            return Ok(Vec::new());
        };

        let mut scan = Scan {
            text,
            path,
            pos: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
        };

        while scan.pos < text.len() {
            let indented = match self.whitespace.find(scan.rest()) {
                Some(m) => {
                    scan.pos += m.end();
                    true
                }
                None => false,
            };
            if scan.pos >= text.len() {
                break;
            }
            self.next_token(&mut scan, indented)?;
        }

        tracing::debug!(
            "Tokenized {} into {} tokens over {} lines",
            path.display(),
            scan.tokens.len(),
            scan.line
        );
        Ok(scan.tokens)
    }

    fn next_token(&self, scan: &mut Scan<'_>, indented: bool) -> Result<(), LockfileError> {
        let rest = scan.rest();

        for matcher in &self.matchers {
            let Some(caps) = matcher.pattern.captures(rest) else {
                continue;
            };
            let matched = caps.get(0).map_or("", |m| m.as_str());

            match matcher.rule {
                Rule::ConflictMarker => {
                    return Err(scan.error(format!(
                        "Your lock file contains merge conflicts ('{matched}'). \
                         Resolve the conflicts and try again"
                    )));
                }
                Rule::Newline => {
                    scan.push(TokenKind::Newline, matched, matched.len());
                    scan.line += 1;
                    scan.line_start = scan.pos;
                }
                Rule::Uppercase if !indented => {
                    scan.push(TokenKind::Section, matched, matched.len());
                }
                Rule::Uppercase => {
                    let tail = self
                        .text_tail
                        .find(&rest[matched.len()..])
                        .map_or(0, |m| m.end());
                    let len = matched.len() + tail;
                    scan.push(TokenKind::Text, &rest[..len], len);
                }
                Rule::Entry => {
                    let name = caps.get(1).map_or("", |m| m.as_str());
                    // consume the colon but leave the whitespace for the next scan
                    scan.push(TokenKind::Entry, name, name.len() + 1);
                }
                Rule::Punctuation => {
                    let kind = match matched {
                        "(" => TokenKind::LParen,
                        ")" => TokenKind::RParen,
                        "," => TokenKind::Comma,
                        _ if rest.starts_with("!=") => continue,
                        _ => TokenKind::Bang,
                    };
                    scan.push(kind, matched, matched.len());
                }
                Rule::Requirement => {
                    scan.push(TokenKind::Requirement, matched, matched.len());
                }
                Rule::Text => {
                    scan.push(TokenKind::Text, matched, matched.len());
                }
            }
            return Ok(());
        }

        let unexpected = rest.chars().next().unwrap_or_default();
        Err(LockfileError::Defect {
            message: format!(
                "no lexical rule matches {unexpected:?} at line {}, column {}",
                scan.line,
                scan.column()
            ),
            path: scan.path.to_path_buf(),
        })
    }
}

/// Mutable scanning state for one tokenize pass
struct Scan<'a> {
    text: &'a str,
    path: &'a Path,
    pos: usize,
    line: usize,
    line_start: usize,
    tokens: Vec<Token>,
}

impl<'a> Scan<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn column(&self) -> usize {
        self.pos - self.line_start
    }

    fn push(&mut self, kind: TokenKind, value: &str, consumed: usize) {
        self.tokens
            .push(Token::new(kind, value, self.column(), self.line));
        self.pos += consumed;
    }

    fn error(&self, message: String) -> LockfileError {
        LockfileError::Parse {
            message,
            line: self.line,
            column: self.column(),
            path: self.path.to_path_buf(),
        }
    }
}

/// Tokenize lock file contents with a freshly compiled [`Tokenizer`]
pub fn tokenize(input: Option<&str>, path: &Path) -> Result<Vec<Token>, LockfileError> {
    Tokenizer::new()?.tokenize(input, path)
}
