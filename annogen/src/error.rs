//! Error types for registration, dispatch and generator execution.
//!
//! Parsing never fails, so there is no parse error here. The remaining
//! failures fall into three groups:
//!
//! - [`RegistryError`]: a generator plugin registered something invalid. These
//!   are programmer errors and should stop startup.
//! - [`DispatchError`]: a directive could not be routed, or its generator
//!   failed. Only [`DispatchError::Generator`] aborts a declaration.
//! - [`GeneratorError`]: what generator callables return.

use crate::declaration::Kind;
use crate::registry::Shape;
use thiserror::Error;

/// Result type alias for registration.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for generator callables.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error returned when registering a generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A generator is already registered for this name and shape.
    #[error("Generator '{name}' is already registered for {shape} declarations")]
    DuplicateGenerator { name: String, shape: Shape },

    /// The generator's signature cannot handle the requested kind.
    #[error("Generator '{name}' has a {signature} signature, which cannot handle {kind} declarations")]
    UnsupportedSignature {
        name: String,
        kind: Kind,
        signature: &'static str,
    },

    /// Directive names must be non-empty and free of `(`.
    #[error("Invalid directive name '{name}'")]
    InvalidName { name: String },
}

impl RegistryError {
    /// Create a duplicate generator error.
    pub fn duplicate(name: impl Into<String>, shape: Shape) -> Self {
        Self::DuplicateGenerator {
            name: name.into(),
            shape,
        }
    }

    /// Create an unsupported signature error.
    pub fn unsupported(name: impl Into<String>, kind: Kind, signature: &'static str) -> Self {
        Self::UnsupportedSignature {
            name: name.into(),
            kind,
            signature,
        }
    }
}

/// Error produced while dispatching a declaration's directives.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The directive is registered, but not for this declaration's kind.
    /// Recorded in the outcome; dispatch continues.
    #[error("Directive '@{directive}' on '{declaration}' has no generator for {kind} declarations")]
    NoGeneratorForKind {
        directive: String,
        declaration: String,
        kind: Kind,
    },

    /// The generator returned an error. Aborts the declaration.
    #[error("Generator '@{directive}' failed on '{declaration}': {source}")]
    Generator {
        directive: String,
        declaration: String,
        #[source]
        source: GeneratorError,
    },
}

impl DispatchError {
    /// Returns true if this error aborts the declaration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Generator { .. })
    }

    /// Name of the directive that produced this error.
    pub fn directive(&self) -> &str {
        match self {
            Self::NoGeneratorForKind { directive, .. } | Self::Generator { directive, .. } => {
                directive
            }
        }
    }
}

/// Error returned by generator callables.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required directive parameter was not given.
    #[error("Missing parameter '{param}'")]
    MissingParam { param: String },

    /// The directive needs an embedded template body but has none.
    #[error("Directive '@{directive}' requires a template body")]
    MissingTemplate { directive: String },

    /// A parameter was given but its value is unusable.
    #[error("Invalid value for '{param}': {message}")]
    InvalidParam { param: String, message: String },

    /// Free-form failure.
    #[error("{0}")]
    Message(String),

    /// IO error while producing content.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error from a generator plugin.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeneratorError {
    /// Create a missing parameter error.
    pub fn missing_param(param: impl Into<String>) -> Self {
        Self::MissingParam {
            param: param.into(),
        }
    }

    /// Create a missing template error.
    pub fn missing_template(directive: impl Into<String>) -> Self {
        Self::MissingTemplate {
            directive: directive.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a free-form error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
