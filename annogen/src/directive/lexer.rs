//! Line lexer for comment text.
//!
//! Each raw line is normalized by removing surrounding whitespace and comment
//! leaders, then classified into a [`Token`].

use regex::Regex;
use std::sync::LazyLock;

/// Marker that starts a directive line.
pub const DIRECTIVE_MARKER: char = '@';

/// Prefix of the line that closes an embedded template.
pub const TEMPLATE_TERMINATOR: &str = "})";

// Leading comment markers: `//`, `///`, `//!`, `/*`, `/**`, `/*!`, or a run of `*`
// as used on the continuation lines of block comments.
static COMMENT_LEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?://[/!]?|/\*[*!]?|\*+)").unwrap());

/// A single normalized comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Nothing left after stripping.
    Blank,
    /// A line starting with `@`.
    Directive(&'a str),
    /// A line starting with `})`.
    TemplateEnd(&'a str),
    /// Any other text.
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// The normalized text of the line.
    pub fn text(&self) -> &'a str {
        match self {
            Token::Blank => "",
            Token::Directive(text) | Token::TemplateEnd(text) | Token::Text(text) => text,
        }
    }

    pub fn is_directive(&self) -> bool {
        matches!(self, Token::Directive(_))
    }
}

/// Strip whitespace and comment leaders from one raw line.
///
/// On block comment lines (opened by `/*` or continued with `*`), a trailing
/// `*/` is removed before the leader, so `/** @x */` yields `@x`. Line
/// comments keep it.
pub fn strip_leader(line: &str) -> &str {
    let mut text = line.trim();
    if text.starts_with("/*") || text.starts_with('*') {
        if let Some(rest) = text.strip_suffix("*/") {
            text = rest.trim_end();
        }
    }
    match COMMENT_LEADER_REGEX.find(text) {
        Some(leader) => text[leader.end()..].trim(),
        None => text,
    }
}

/// Normalize and classify one raw line.
pub fn lex(line: &str) -> Token<'_> {
    let text = strip_leader(line);
    if text.is_empty() {
        Token::Blank
    } else if text.starts_with(DIRECTIVE_MARKER) {
        Token::Directive(text)
    } else if text.starts_with(TEMPLATE_TERMINATOR) {
        Token::TemplateEnd(text)
    } else {
        Token::Text(text)
    }
}
