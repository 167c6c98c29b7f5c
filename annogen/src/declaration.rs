//! Declarations that directives attach to.
//!
//! Declarations are produced by an external classifier (for example a source
//! scanner) and are read-only input to dispatch. The classifier supplies the raw
//! comment text; [`Declaration::from_comment`] runs the directive parser on it.

use crate::directive::{self, Directive};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The kind of program entity a declaration represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Package,
    Struct,
    Interface,
    Function,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source location of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    /// File path.
    pub file: PathBuf,

    /// Line number (1-indexed).
    pub line: usize,

    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A kind-tagged program entity carrying directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Kind of entity.
    pub kind: Kind,

    /// Declared name (`Foo`, `my_module`).
    pub name: String,

    /// Module path of the declaration (`crate::models`).
    pub path: String,

    /// Where the declaration starts.
    pub position: Position,

    /// Directives parsed from the attached comment, in source order.
    pub directives: Vec<Directive>,
}

impl Declaration {
    /// Create a declaration with no directives.
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: String::new(),
            position: Position::default(),
            directives: Vec::new(),
        }
    }

    /// Create a declaration by parsing its raw comment text.
    pub fn from_comment(kind: Kind, name: impl Into<String>, comment: &str) -> Self {
        Self::new(kind, name).with_directives(directive::parse(comment))
    }

    /// Set the module path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the source position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Replace the directives.
    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = directives;
        self
    }

    /// Whether any directive is attached.
    pub fn has_directives(&self) -> bool {
        !self.directives.is_empty()
    }

    /// Directives with the given name, in order.
    pub fn directives_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Directive> {
        self.directives.iter().filter(move |d| d.name == name)
    }

    /// `path::name`, or just the name at the crate root.
    pub fn qualified_name(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.path, self.name)
        }
    }
}

/// A package declaration together with everything declared in it.
///
/// Type-level generators receive this as their document context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageContext {
    /// The package itself.
    pub package: Declaration,

    /// Declarations inside the package, in source order.
    pub declarations: Vec<Declaration>,
}

impl PackageContext {
    /// Create a context for a package declaration.
    ///
    /// The declaration's kind is not checked; classifiers are expected to pass
    /// a [`Kind::Package`].
    pub fn new(package: Declaration) -> Self {
        Self {
            package,
            declarations: Vec::new(),
        }
    }

    /// Add a declaration to the package.
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Find a declaration by name.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Declarations of a given kind.
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(move |d| d.kind == kind)
    }

    /// Total number of directives in the package, including its own.
    pub fn directive_count(&self) -> usize {
        self.package.directives.len()
            + self
                .declarations
                .iter()
                .map(|d| d.directives.len())
                .sum::<usize>()
    }
}
