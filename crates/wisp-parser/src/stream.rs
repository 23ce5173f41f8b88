//! Token stream wrapper for the hand-written parser.

use wisp_lexer::{Token, TokenKind};

use crate::error::ParseError;

/// Token stream with lookahead and position tracking.
///
/// The slice is expected to end with an `Eof` token (the tokenizer
/// guarantees this); `peek` clamps to the final token so lookahead past the
/// end stays well-defined.
pub struct TokenStream<'src> {
    tokens: &'src [Token],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(tokens: &'src [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> &'src Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Advance past the current token and return it.
    pub fn advance(&mut self) -> &'src Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Check whether the current token has the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consume a token of the given kind or fail, describing what was
    /// expected.
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'src Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(ParseError::expected(expected, self.peek()))
    }

    /// Whether the stream is positioned at the end-of-input marker.
    pub fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Current position, for speculative parsing.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewind to a position previously returned by [`position`].
    ///
    /// [`position`]: TokenStream::position
    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Skip any run of `Newline` tokens.
    pub fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }
}
