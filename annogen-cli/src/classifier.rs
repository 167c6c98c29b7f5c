//! Turns Rust source files into annotated declarations.
//!
//! Every `.rs` file is one package. Its inner doc comments (`//!`, `/*! */`)
//! belong to the package declaration; outer doc comments (`///`, `/** */`) on
//! items belong to the item:
//!
//! | item | kind |
//! |------|------|
//! | `struct`, `enum` | [`Kind::Struct`] |
//! | `trait` | [`Kind::Interface`] |
//! | `fn` | [`Kind::Function`] |
//!
//! Inline `mod name { ... }` blocks are walked with their path extended.

use crate::error::ClassifyError;
use crate::scanner::SourceFile;
use annogen::{Declaration, Kind, PackageContext, Position};
use std::path::{Component, Path};
use syn::{AttrStyle, Attribute, Expr, Item, Lit, Meta};

/// Module path segment for the crate root.
const CRATE_ROOT: &str = "crate";

/// Classifier for Rust source files.
#[derive(Debug)]
pub struct Classifier {
    /// Keep declarations without directives in the package context.
    include_plain: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            include_plain: true,
        }
    }

    /// Drop declarations that carry no directives.
    pub fn annotated_only(mut self) -> Self {
        self.include_plain = false;
        self
    }

    /// Classify one source file into a package context.
    pub fn classify(&self, source: &SourceFile) -> Result<PackageContext, ClassifyError> {
        let file = syn::parse_file(&source.content)
            .map_err(|e| ClassifyError::from_syn(source.path.clone(), &e))?;

        let segments = module_segments(&source.relative_path);
        let module_path = segments.join("::");
        let (name, parent) = match segments.split_last() {
            Some((last, parent)) if !parent.is_empty() => (last.clone(), parent.join("::")),
            _ => (CRATE_ROOT.to_string(), String::new()),
        };

        let docs = doc_text(&file.attrs, true);
        let package = Declaration::from_comment(Kind::Package, name, &docs)
            .with_path(parent)
            .with_position(Position::new(&source.relative_path, 1, 1));

        let mut context = PackageContext::new(package);
        self.walk(&file.items, &module_path, &source.relative_path, &mut context);

        tracing::debug!(
            file = %source.relative_path.display(),
            package = %context.package.qualified_name(),
            declarations = context.declarations.len(),
            "classified source file"
        );
        Ok(context)
    }

    /// Classify many files, collecting syntax errors instead of stopping.
    pub fn classify_all(
        &self,
        sources: &[SourceFile],
    ) -> (Vec<PackageContext>, Vec<ClassifyError>) {
        let mut packages = Vec::new();
        let mut errors = Vec::new();

        for source in sources {
            match self.classify(source) {
                Ok(package) => packages.push(package),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unparsable file");
                    errors.push(e);
                }
            }
        }

        (packages, errors)
    }

    fn walk(&self, items: &[Item], path: &str, file: &Path, context: &mut PackageContext) {
        for item in items {
            let (kind, ident, attrs) = match item {
                Item::Struct(item) => (Kind::Struct, &item.ident, &item.attrs),
                Item::Enum(item) => (Kind::Struct, &item.ident, &item.attrs),
                Item::Trait(item) => (Kind::Interface, &item.ident, &item.attrs),
                Item::Fn(item) => (Kind::Function, &item.sig.ident, &item.attrs),
                Item::Mod(item) => {
                    if let Some((_, nested)) = &item.content {
                        let nested_path = format!("{}::{}", path, item.ident);
                        self.walk(nested, &nested_path, file, context);
                    }
                    continue;
                }
                _ => continue,
            };

            let start = ident.span().start();
            let declaration = Declaration::from_comment(
                kind,
                ident.to_string(),
                &doc_text(attrs, false),
            )
            .with_path(path)
            .with_position(Position::new(file, start.line, start.column + 1));

            if self.include_plain || declaration.has_directives() {
                context.push(declaration);
            }
        }
    }
}

/// Join inner (`//!`) or outer (`///`) doc attributes into comment text, one
/// entry per line.
fn doc_text(attrs: &[Attribute], inner: bool) -> String {
    attrs
        .iter()
        .filter(|attr| matches!(attr.style, AttrStyle::Inner(_)) == inner)
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Module path of a file relative to the scan root.
///
/// A leading `src` is dropped, and `lib.rs`, `main.rs` and `mod.rs` name their
/// directory: `src/models/mod.rs` and `src/models.rs` are both
/// `crate::models`.
pub fn module_segments(relative_path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = relative_path
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.first().is_some_and(|s| s == "src") {
        segments.remove(0);
    }
    if segments
        .last()
        .is_some_and(|s| matches!(s.as_str(), "lib" | "main" | "mod"))
    {
        segments.pop();
    }

    std::iter::once(CRATE_ROOT.to_string()).chain(segments).collect()
}
