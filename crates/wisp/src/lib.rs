// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! # Wisp behavior-script compiler
//!
//! Facade over the compilation pipeline:
//!
//! ```text
//! wisp-lexer   - tokenization (indentation-sensitive)
//!     ↓
//! wisp-parser  - recursive descent parsing to AST
//!     ↓
//! wisp (facade) - re-exports + compile API
//! ```
//!
//! Compilation happens once per batch at script-load time; the returned
//! [`BehaviorDecl`] is then executed every frame by `wisp-runtime`.
//!
//! ## Usage
//!
//! ```
//! let behavior = wisp::compile("@behavior drift:\n    pos.x += dt\n").unwrap();
//! assert_eq!(behavior.name, "drift");
//! ```

use thiserror::Error;

// Re-export AST types
pub use wisp_ast as ast;
pub use wisp_ast::BehaviorDecl;

// Re-export lexer
pub use wisp_lexer as lexer;
pub use wisp_lexer::{tokenize, LexError, Token, TokenKind};

// Re-export parser
pub use wisp_parser as parser;
pub use wisp_parser::{parse, ParseError};

/// Script compilation error.
///
/// Raised once, at script-load time; surface it to the script author
/// immediately rather than retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Compile a behavior script from source text.
///
/// Tokenizes and parses in one step, returning the behavior declaration or
/// the first error with its source line.
pub fn compile(source: &str) -> Result<BehaviorDecl, CompileError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}
