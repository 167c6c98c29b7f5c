//! Built-in generators and registry assembly.
//!
//! - [`templater`] renders a directive's embedded template.
//! - [`manifest`] writes a JSON description of a package.

pub mod manifest;
pub mod templater;

use crate::config::GeneratorsConfig;
use annogen::{Directive, Registry, RegistryResult};
use std::path::PathBuf;

/// Directive name of the template renderer.
pub const TEMPLATER: &str = "templater";

/// Directive name of the package manifest writer.
pub const MANIFEST: &str = "manifest";

/// Registry holding every built-in generator.
pub fn builtin() -> RegistryResult<Registry> {
    let mut registry = Registry::new();
    registry.register_package(TEMPLATER, templater::render_package)?;
    registry.register_struct(TEMPLATER, templater::render_type)?;
    registry.register_interface(TEMPLATER, templater::render_type)?;
    registry.register_package(MANIFEST, manifest::manifest)?;
    Ok(registry)
}

/// Build the registry used for a run.
///
/// Disabled names are removed from the built-ins first, then `custom` is
/// merged on top with the configured precedence. A caller generator may
/// therefore reuse a disabled built-in name.
pub fn build_registry(config: &GeneratorsConfig, custom: &Registry) -> RegistryResult<Registry> {
    let mut registry = builtin()?;

    for name in &config.disabled {
        if registry.remove(name) {
            tracing::debug!(name = %name, "disabled built-in generator");
        } else {
            tracing::warn!(name = %name, "cannot disable unknown generator");
        }
    }

    registry.merge(custom, config.precedence);
    Ok(registry)
}

/// Output directory for a generator: the `dir` param, or the module path
/// below the crate root (`crate::models::user` -> `models/user`).
pub(crate) fn output_dir(directive: &Directive, module_path: &str) -> PathBuf {
    match directive.param("dir") {
        Some(dir) => PathBuf::from(dir),
        None => module_path
            .split("::")
            .filter(|segment| !segment.is_empty() && *segment != "crate")
            .collect(),
    }
}
