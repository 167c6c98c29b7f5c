//! Error types for the CLI.
//!
//! Each pipeline stage has its own enum. [`CliError`] wraps the ones that stop
//! a command; classify and write errors are per file and are collected in the
//! run report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to scan sources: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// A built-in or caller generator could not be registered.
    #[error("Failed to build generator registry: {0}")]
    Registry(#[from] annogen::RegistryError),

    /// One or more declarations failed to generate.
    #[error("{failed} declaration(s) failed to generate")]
    GenerationFailed { failed: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during source discovery.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error turning a source file into declarations.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The file is not valid Rust.
    #[error("Syntax error in {file}:{line}:{column}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error materializing a write directive.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Generators must produce paths relative to the output root.
    #[error("Refusing absolute output path: {path}")]
    AbsolutePath { path: PathBuf },

    /// `..` would leave the output root.
    #[error("Output path escapes the output root: {path}")]
    EscapesRoot { path: PathBuf },

    #[error("Invalid output file name '{name}'")]
    InvalidFileName { name: String },

    #[error("Failed to read generated content for {path}: {source}")]
    ReadContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl ClassifyError {
    /// Build a syntax error from a `syn` error, using its span for the location.
    pub fn from_syn(file: PathBuf, error: &syn::Error) -> Self {
        let start = error.span().start();
        Self::Syntax {
            file,
            line: start.line.max(1),
            column: start.column + 1,
            message: error.to_string(),
        }
    }
}

impl ConfigError {
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
