//! Generator traits and the tagged union the registry stores.
//!
//! There are two callable signatures:
//!
//! - [`PackageGenerator`]: `(target_dir, directive, package)`.
//! - [`TypeGenerator`]: `(target_dir, directive, declaration, package_context)`,
//!   used for struct and interface declarations.
//!
//! Both are implemented automatically for plain functions and closures with the
//! matching signature.

use crate::declaration::{Declaration, Kind, PackageContext};
use crate::directive::Directive;
use crate::error::GeneratorResult;
use crate::registry::Shape;
use crate::write::WriteDirective;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Generator for package-level directives.
pub trait PackageGenerator: Send + Sync + 'static {
    fn generate(
        &self,
        target_dir: &Path,
        directive: &Directive,
        package: &Declaration,
    ) -> GeneratorResult<Vec<WriteDirective>>;
}

impl<F> PackageGenerator for F
where
    F: Fn(&Path, &Directive, &Declaration) -> GeneratorResult<Vec<WriteDirective>>
        + Send
        + Sync
        + 'static,
{
    fn generate(
        &self,
        target_dir: &Path,
        directive: &Directive,
        package: &Declaration,
    ) -> GeneratorResult<Vec<WriteDirective>> {
        (self)(target_dir, directive, package)
    }
}

/// Generator for directives on struct or interface declarations.
pub trait TypeGenerator: Send + Sync + 'static {
    fn generate(
        &self,
        target_dir: &Path,
        directive: &Directive,
        declaration: &Declaration,
        package: &PackageContext,
    ) -> GeneratorResult<Vec<WriteDirective>>;
}

impl<F> TypeGenerator for F
where
    F: Fn(&Path, &Directive, &Declaration, &PackageContext) -> GeneratorResult<Vec<WriteDirective>>
        + Send
        + Sync
        + 'static,
{
    fn generate(
        &self,
        target_dir: &Path,
        directive: &Directive,
        declaration: &Declaration,
        package: &PackageContext,
    ) -> GeneratorResult<Vec<WriteDirective>> {
        (self)(target_dir, directive, declaration, package)
    }
}

/// A registered generator callable.
#[derive(Clone)]
pub enum Generator {
    /// Takes the package declaration only.
    Package(Arc<dyn PackageGenerator>),
    /// Takes a struct or interface declaration plus its package context.
    Type(Arc<dyn TypeGenerator>),
}

impl Generator {
    /// Wrap a package-level callable.
    pub fn package<G: PackageGenerator>(generator: G) -> Self {
        Self::Package(Arc::new(generator))
    }

    /// Wrap a type-level callable.
    pub fn typed<G: TypeGenerator>(generator: G) -> Self {
        Self::Type(Arc::new(generator))
    }

    /// Name of the callable signature, for error messages.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Package(_) => "package",
            Self::Type(_) => "type",
        }
    }

    /// The shape this generator takes when registered for `kind`.
    ///
    /// Returns `None` when the signature cannot handle the kind.
    pub fn shape_for(&self, kind: Kind) -> Option<Shape> {
        match (self, kind) {
            (Self::Package(_), Kind::Package) => Some(Shape::Package),
            (Self::Type(_), Kind::Struct) => Some(Shape::Struct),
            (Self::Type(_), Kind::Interface) => Some(Shape::Interface),
            _ => None,
        }
    }

    /// Invoke the generator with the arguments its signature needs.
    pub(crate) fn invoke(
        &self,
        target_dir: &Path,
        directive: &Directive,
        declaration: &Declaration,
        package: &PackageContext,
    ) -> GeneratorResult<Vec<WriteDirective>> {
        match self {
            Self::Package(generator) => generator.generate(target_dir, directive, declaration),
            Self::Type(generator) => generator.generate(target_dir, directive, declaration, package),
        }
    }

    /// Whether two handles point at the same callable.
    pub fn ptr_eq(&self, other: &Generator) -> bool {
        match (self, other) {
            (Self::Package(a), Self::Package(b)) => Arc::ptr_eq(a, b),
            (Self::Type(a), Self::Type(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator::{}", self.signature())
    }
}
