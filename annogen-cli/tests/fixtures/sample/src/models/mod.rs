//! Domain models.
//! @templater(file => README.md, {
//!     # {{package}}
//!
//!     Module `{{path}}`.
//! })
//! @unknown_package_directive

pub mod user;
