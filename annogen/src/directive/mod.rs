//! Annotation directives embedded in comment text.
//!
//! A directive is a line starting with `@`:
//!
//! ```text
//! /// @name
//! /// @name(a, b, c)
//! /// @name(key => value, other)
//! /// @templater(id => X, {
//! ///     body line 1
//! ///     body line 2
//! /// })
//! /// @next
//! ```
//!
//! [`parse`] turns comment text into an ordered list of [`Directive`]s. It never
//! fails: anything it does not recognize is skipped.

pub mod lexer;
pub mod parser;

pub use parser::{parse, parse_lines};

use serde::Serialize;
use std::collections::BTreeMap;

/// One parsed `@name(...)` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Directive identifier, without the leading `@`.
    pub name: String,

    /// Positional arguments, trimmed, empty entries dropped.
    pub arguments: Vec<String>,

    /// Arguments written as `key => value`. Also present in `arguments`.
    pub params: BTreeMap<String, String>,

    /// Embedded template body, if the argument list opened a `{` block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// 1-based line within the parsed comment text.
    pub line: usize,
}

impl Directive {
    /// Create a directive with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            params: BTreeMap::new(),
            template: None,
            line: 1,
        }
    }

    /// Get a `key => value` parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter, or fail with [`GeneratorError::MissingParam`].
    ///
    /// [`GeneratorError::MissingParam`]: crate::GeneratorError::MissingParam
    pub fn require_param(&self, key: &str) -> crate::GeneratorResult<&str> {
        self.param(key)
            .ok_or_else(|| crate::GeneratorError::missing_param(key))
    }

    /// Positional arguments that are not `key => value` pairs.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .map(String::as_str)
            .filter(|arg| !arg.contains(parser::PARAM_SEPARATOR))
    }

    /// Whether an embedded template body was captured.
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }
}
