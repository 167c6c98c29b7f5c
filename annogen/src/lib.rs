//! # annogen
//!
//! Comment annotation parsing and generator dispatch.
//!
//! Declarations carry comments; comments carry directives such as
//! `@templater(file => user.rs, { ... })`. This crate parses those directives
//! and routes each one to a generator registered under its name, picking the
//! generator by the kind of declaration it decorates. Generators return
//! [`WriteDirective`]s, virtual files for a writer to materialize.
//!
//! ## Modules
//!
//! - [`directive`] - comment lexer and directive parser
//! - [`declaration`] - declarations, kinds and package context
//! - [`generator`] - generator traits and the stored generator union
//! - [`registry`] - registration, lookup and merging
//! - [`dispatch`] - per-declaration and per-package dispatch
//! - [`write`] - generator outputs
//! - [`error`] - error types
//!
//! ## Example
//! ```rust,ignore
//! use annogen::{Declaration, Kind, PackageContext, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register_struct("templater", render_template)?;
//!
//! let user = Declaration::from_comment(Kind::Struct, "User", comment_text);
//! let pkg = PackageContext::new(Declaration::new(Kind::Package, "models"));
//! let outcome = registry.dispatch(Path::new("generated"), &user, &pkg)?;
//! ```

pub mod declaration;
pub mod directive;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod registry;
pub mod write;

#[cfg(test)]
mod tests;

pub use declaration::{Declaration, Kind, PackageContext, Position};
pub use directive::Directive;
pub use dispatch::{BatchReport, DeclarationResult, DispatchOutcome};
pub use error::{
    DispatchError, GeneratorError, GeneratorResult, RegistryError, RegistryResult,
};
pub use generator::{Generator, PackageGenerator, TypeGenerator};
pub use registry::{Lookup, Precedence, Registry, Shape};
pub use write::{Content, WriteDirective};
