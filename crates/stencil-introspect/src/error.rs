//! Error types for class introspection

use thiserror::Error;

/// Result type for introspection calls
pub type IntrospectResult<T> = Result<T, IntrospectError>;

/// Introspection error types
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// No class supplied to inspect
    #[error("target type is null or invalid")]
    MissingTarget,

    /// Class supplied but unusable (e.g. blank name)
    #[error("target type is invalid: {0}")]
    InvalidTarget(String),

    /// Name did not resolve through the provider
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// Type name in a signature could not be parsed
    #[error("invalid type name: {0:?}")]
    InvalidTypeName(String),

    /// No-argument construction probe failed
    #[error("cannot instantiate {class}: {reason}")]
    NotInstantiable {
        /// Qualified class name
        class: String,
        /// Why construction failed
        reason: String,
    },

    /// Field is not readable from the template context
    #[error("access denied to {class}.{field}")]
    AccessDenied {
        /// Qualified class name
        class: String,
        /// Field name
        field: String,
    },

    /// Failed to read a catalog file
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON catalog
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a TOML catalog or config
    #[error("failed to parse catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// Catalog parsed but is inconsistent
    #[error("invalid catalog: {0}")]
    Catalog(String),
}
