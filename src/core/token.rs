//! Lock file tokens
//!
//! The tokenizer produces a flat sequence of [`Token`]s in document order.
//! Every token keeps its position so the parser can report errors after the
//! token has been consumed.

use std::fmt;

use serde::Serialize;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// End of a line
    Newline,
    /// Unindented all-caps section header (`GEM`, `PLATFORMS`, ...)
    Section,
    /// `name:` followed by whitespace (`remote:`, `specs:`, ...)
    Entry,
    /// Any other word: names, versions, URIs, platforms
    Text,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// A requirement operator (`=`, `!=`, `>`, `<`, `>=`, `<=`, `~>`)
    Requirement,
    /// `,`
    Comma,
    /// `!`
    Bang,
}

impl TokenKind {
    /// Name used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newline => "newline",
            Self::Section => "section",
            Self::Entry => "entry",
            Self::Text => "text",
            Self::LParen => "l_paren",
            Self::RParen => "r_paren",
            Self::Requirement => "requirement",
            Self::Comma => "comma",
            Self::Bang => "bang",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token with its kind, text and source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Byte offset from the start of the line
    pub column: usize,
    /// 1-based line number
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, column: usize, line: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            column,
            line,
        }
    }

    /// Whether the token has the given kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => f.write_str("newline"),
            kind => write!(f, "{kind} {:?}", self.value),
        }
    }
}
