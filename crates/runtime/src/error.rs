//! Runtime errors

use thiserror::Error;

/// Runtime result type
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised while executing a behavior.
///
/// Fatal to that `execute` call only: the compiled behavior stays valid and
/// may run again on a later frame with corrected bindings. The host is
/// expected to log the error and may skip the frame's script effects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("unknown field or constant '{0}'")]
    UnknownBinding(String),

    #[error("cannot assign to unknown field '{0}'")]
    UnknownTarget(String),

    #[error("field '{name}' has {actual} elements, expected {expected}")]
    FieldLength {
        name: String,
        expected: usize,
        actual: usize,
    },
}
