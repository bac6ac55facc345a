//! Error types for cookie handling

use thiserror::Error;

/// Cookie error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    /// Max age given as text that is not a decimal integer
    #[error("invalid max age: {0:?}")]
    InvalidMaxAge(String),

    /// Cookie name that is not an HTTP token
    #[error("invalid cookie name: {0:?}")]
    InvalidName(String),

    /// Cookie value with whitespace, control characters, `;` or `,`
    #[error("invalid cookie value: {0:?}")]
    InvalidValue(String),
}
