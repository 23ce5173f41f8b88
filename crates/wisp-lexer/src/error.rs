//! Lexical error types.

use thiserror::Error;

/// Lexical error.
///
/// Always fatal to compilation; carries the 1-based source line of the
/// offending text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{text}' at line {line}")]
    UnexpectedCharacter { text: String, line: u32 },

    #[error("unexpected '!' at line {line}, did you mean '!='?")]
    LoneBang { line: u32 },

    #[error("unknown directive @{name} at line {line}")]
    UnknownDirective { name: String, line: u32 },

    #[error("inconsistent indentation at line {line}")]
    InconsistentIndentation { line: u32 },
}
