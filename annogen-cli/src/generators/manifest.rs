//! Package manifest generator.
//!
//! `//! @manifest` on a file writes `<package>.manifest.json` describing the
//! package declaration and its parsed directives. `file` and `dir` params
//! override the location.

use super::output_dir;
use annogen::{Declaration, Directive, GeneratorResult, Kind, Position, WriteDirective};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    package: &'a str,
    path: String,
    kind: Kind,
    position: &'a Position,
    directives: &'a [Directive],
}

/// Write a JSON manifest for a package declaration.
pub fn manifest(
    _target_dir: &Path,
    directive: &Directive,
    package: &Declaration,
) -> GeneratorResult<Vec<WriteDirective>> {
    let path = package.qualified_name();
    let file_name = directive
        .param("file")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.manifest.json", package.name));

    let body = Manifest {
        package: &package.name,
        path: path.clone(),
        kind: package.kind,
        position: &package.position,
        directives: &package.directives,
    };
    let mut json = serde_json::to_string_pretty(&body)?;
    json.push('\n');

    Ok(vec![WriteDirective::new(
        output_dir(directive, &path),
        file_name,
        json,
    )])
}
