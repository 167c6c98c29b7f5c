//! Template rendering generator.
//!
//! ```text
//! /// @templater(file => user_repo.rs, dir => repos, {
//! ///     pub struct {{name}}Repo;
//! /// })
//! ```
//!
//! Placeholders are `{{name}}`, `{{kind}}`, `{{path}}`, `{{package}}`, the
//! case variants `{{name_snake}}`, `{{name_camel}}`, `{{name_pascal}}`,
//! `{{name_kebab}}`, `{{name_screaming}}`, and any directive parameter by its
//! key. Unknown placeholders are left in place.
//!
//! Parameters:
//! - `file`: output file name (default `<name_snake>.<ext>`)
//! - `ext`: extension for the default file name (default `rs`)
//! - `dir`: output sub-directory (default the module path)
//! - `override`: `false` keeps an existing file

use super::output_dir;
use annogen::{
    Declaration, Directive, GeneratorError, GeneratorResult, PackageContext, WriteDirective,
};
use convert_case::{Case, Casing};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

const DEFAULT_EXT: &str = "rs";

/// Render a template attached to a package declaration.
pub fn render_package(
    _target_dir: &Path,
    directive: &Directive,
    package: &Declaration,
) -> GeneratorResult<Vec<WriteDirective>> {
    let module_path = package.qualified_name();
    render(directive, package, &package.name, &module_path)
}

/// Render a template attached to a struct or interface declaration.
pub fn render_type(
    _target_dir: &Path,
    directive: &Directive,
    declaration: &Declaration,
    package: &PackageContext,
) -> GeneratorResult<Vec<WriteDirective>> {
    render(directive, declaration, &package.package.name, &declaration.path)
}

fn render(
    directive: &Directive,
    declaration: &Declaration,
    package_name: &str,
    module_path: &str,
) -> GeneratorResult<Vec<WriteDirective>> {
    let template = directive
        .template
        .as_deref()
        .ok_or_else(|| GeneratorError::missing_template(&directive.name))?;

    let file_name = file_name(directive, declaration)?;
    let dont_override = match directive.param("override") {
        None | Some("true") => false,
        Some("false") => true,
        Some(other) => {
            return Err(GeneratorError::invalid_param(
                "override",
                format!("expected true or false, got '{}'", other),
            ))
        }
    };

    let mut vars = Placeholders::for_declaration(declaration, package_name, module_path);
    vars.extend_params(directive);

    let mut content = vars.substitute(template);
    if !content.ends_with('\n') {
        content.push('\n');
    }

    let write = WriteDirective::new(output_dir(directive, module_path), file_name, content)
        .dont_override(dont_override);
    tracing::trace!(path = %write.relative_path().display(), "rendered template");
    Ok(vec![write])
}

fn file_name(directive: &Directive, declaration: &Declaration) -> GeneratorResult<String> {
    if let Some(file) = directive.param("file") {
        if file.is_empty() {
            return Err(GeneratorError::invalid_param("file", "empty file name"));
        }
        return Ok(file.to_string());
    }

    let ext = directive.param("ext").unwrap_or(DEFAULT_EXT);
    if ext.is_empty() || ext.contains(['/', '\\']) {
        return Err(GeneratorError::invalid_param(
            "ext",
            format!("'{}' is not a file extension", ext),
        ));
    }
    Ok(format!("{}.{}", declaration.name.to_case(Case::Snake), ext))
}

/// Placeholder values for one rendering.
#[derive(Debug, Default)]
struct Placeholders {
    values: BTreeMap<String, String>,
}

impl Placeholders {
    fn for_declaration(declaration: &Declaration, package_name: &str, module_path: &str) -> Self {
        let name = declaration.name.as_str();
        let values = [
            ("name", name.to_string()),
            ("kind", declaration.kind.to_string()),
            ("path", module_path.to_string()),
            ("package", package_name.to_string()),
            ("name_snake", name.to_case(Case::Snake)),
            ("name_camel", name.to_case(Case::Camel)),
            ("name_pascal", name.to_case(Case::Pascal)),
            ("name_kebab", name.to_case(Case::Kebab)),
            ("name_screaming", name.to_case(Case::UpperSnake)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { values }
    }

    /// Add directive params. Built-in names are not shadowed.
    fn extend_params(&mut self, directive: &Directive) {
        for (key, value) in &directive.params {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    fn substitute(&self, template: &str) -> String {
        PLACEHOLDER_REGEX
            .replace_all(template, |caps: &Captures| match self.values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
