//! # annogen-cli
//!
//! Driver for the `annogen` tool: finds annotated declarations in Rust
//! sources and runs the matching generators.
//!
//! ## Modules
//!
//! - [`config`] - `annogen.toml` loading and CLI overrides
//! - [`scanner`] - source discovery
//! - [`classifier`] - Rust items to declarations
//! - [`generators`] - built-in generators and registry assembly
//! - [`pipeline`] - the generate run
//! - [`writer`] - materializing write directives
//! - [`logging`] - tracing setup
//! - [`error`] - error types

pub mod classifier;
pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod pipeline;
pub mod scanner;
pub mod writer;

pub use classifier::Classifier;
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use pipeline::{Pipeline, RunReport};
pub use scanner::{SourceFile, SourceScanner};
pub use writer::{FileWriter, WriteResult};
