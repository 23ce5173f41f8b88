// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Hand-written recursive descent parser for Wisp behavior scripts.
//!
//! Consumes the cooked token stream from `wisp-lexer` and produces one
//! [`BehaviorDecl`]. Anything left after the behavior block (other than
//! structural newlines) is a parse error.
//!
//! ## Architecture
//!
//! - `stream`: token stream wrapper with lookahead and rewind
//! - `error`: [`ParseError`] and its categories
//! - `expr`: expression precedence cascade
//! - `stmt`: statements, blocks, and the behavior declaration

mod error;
mod expr;
mod stmt;
mod stream;

pub use error::{ParseError, ParseErrorKind};
pub use stream::TokenStream;

use tracing::trace;
use wisp_ast::BehaviorDecl;
use wisp_lexer::Token;

/// Parse a token sequence into a single behavior declaration.
///
/// The sequence must come from [`wisp_lexer::tokenize`] (in particular it
/// must end with an `Eof` token). Fails on any grammar violation, citing
/// the line and the unexpected token text.
pub fn parse(tokens: &[Token]) -> Result<BehaviorDecl, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::invalid_syntax("empty token stream", 1));
    }

    trace!(tokens = tokens.len(), "parsing behavior script");

    let mut stream = TokenStream::new(tokens);
    stream.skip_newlines();
    let behavior = stmt::parse_behavior(&mut stream)?;
    stream.skip_newlines();

    if !stream.at_end() {
        let found = stream.peek();
        return Err(ParseError::invalid_syntax(
            format!(
                "unexpected token after behavior block: '{}'",
                found.describe()
            ),
            found.line,
        ));
    }

    Ok(behavior)
}
