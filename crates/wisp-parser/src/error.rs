//! Parse error types.

use std::fmt;

use wisp_lexer::{Token, TokenKind};

/// Parse error with source location and context.
///
/// Always fatal to compilation; carries the 1-based line of the offending
/// token and a human-readable message naming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of parse error.
    pub kind: ParseErrorKind,
    /// 1-based source line where the error occurred.
    pub line: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was expected but a different one was found.
    UnexpectedToken,
    /// Input ended while a construct was still incomplete.
    UnexpectedEof,
    /// Tokens are present but violate the grammar structurally.
    InvalidSyntax,
}

impl ParseError {
    /// Create an "expected X, found Y" error from the offending token.
    pub fn expected(what: &str, found: &Token) -> Self {
        let (kind, message) = if found.kind == TokenKind::Eof {
            (
                ParseErrorKind::UnexpectedEof,
                format!("expected {what}, found end of input"),
            )
        } else {
            (
                ParseErrorKind::UnexpectedToken,
                format!("expected {what}, found '{}'", found.describe()),
            )
        };
        Self {
            kind,
            line: found.line,
            message,
        }
    }

    /// Create an "invalid syntax" error with an explicit message.
    pub fn invalid_syntax(message: impl Into<String>, line: u32) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error (line {}): {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}
