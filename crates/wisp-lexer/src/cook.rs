//! Cooking pass: raw tokens to the final stream.
//!
//! Consumes the spanned raw scan, tracks the indentation stack, and emits
//! the cooked token sequence. Indentation rules:
//!
//! - Width is measured at the start of each non-blank, non-comment line
//!   (space = 1, tab = 4).
//! - Width above the stack top pushes a level and emits one `Indent`.
//! - Width below pops and emits one `Dedent` per level; landing between
//!   levels is an indentation error.
//! - Blank and comment-only lines never touch the stack.
//! - A `Newline` is emitted per consumed line break unless the previous
//!   token is already a `Newline` or an `Indent`.
//! - At end of input: a final `Newline` if missing, one `Dedent` per open
//!   level, then `Eof`.

use logos::Logos;

use crate::error::LexError;
use crate::source_map::SourceMap;
use crate::{RawToken, Token, TokenKind};

/// Indentation width of a whitespace run.
fn indent_width(text: &str) -> u32 {
    text.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

pub(crate) struct Cooker<'src> {
    source: &'src str,
    map: SourceMap,
    tokens: Vec<Token>,
    indent_stack: Vec<u32>,
    at_line_start: bool,
    pending_width: u32,
}

impl<'src> Cooker<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            map: SourceMap::new(source),
            tokens: Vec::new(),
            indent_stack: vec![0],
            at_line_start: true,
            pending_width: 0,
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<Token>, LexError> {
        let source = self.source;
        for (result, span) in RawToken::lexer(source).spanned() {
            let text = &source[span.start..span.end];
            let (line, col) = self.map.line_col(span.start);

            let raw = match result {
                Ok(raw) => raw,
                Err(()) => {
                    return Err(if text == "!" {
                        LexError::LoneBang { line }
                    } else {
                        LexError::UnexpectedCharacter {
                            text: text.to_string(),
                            line,
                        }
                    });
                }
            };

            match raw {
                RawToken::Space => {
                    // Only the run at the start of a line carries meaning.
                    if self.at_line_start {
                        self.pending_width += indent_width(text);
                    }
                }
                RawToken::Newline => {
                    // A break on a blank or comment-only line emits nothing.
                    if !self.at_line_start {
                        self.push_line_break(line, col);
                    }
                    self.at_line_start = true;
                    self.pending_width = 0;
                }
                _ => {
                    if self.at_line_start {
                        self.apply_indentation(line, col)?;
                        self.at_line_start = false;
                    }
                    self.push_raw(raw, text, line, col)?;
                }
            }
        }
        self.finish()
    }

    /// Emit a `Newline`, collapsing runs after structural tokens.
    fn push_line_break(&mut self, line: u32, col: u32) {
        let collapse = matches!(
            self.tokens.last().map(|t| t.kind),
            None | Some(TokenKind::Newline) | Some(TokenKind::Indent)
        );
        if !collapse {
            self.tokens
                .push(Token::new(TokenKind::Newline, "", line, col));
        }
    }

    /// Compare the pending line width against the indentation stack.
    fn apply_indentation(&mut self, line: u32, col: u32) -> Result<(), LexError> {
        let width = self.pending_width;
        let top = self.indent_stack.last().copied().unwrap_or(0);

        if width > top {
            self.indent_stack.push(width);
            self.tokens
                .push(Token::new(TokenKind::Indent, "", line, col));
            return Ok(());
        }

        while width < self.indent_stack.last().copied().unwrap_or(0) {
            self.indent_stack.pop();
            self.tokens
                .push(Token::new(TokenKind::Dedent, "", line, col));
        }
        if width != self.indent_stack.last().copied().unwrap_or(0) {
            return Err(LexError::InconsistentIndentation { line });
        }
        Ok(())
    }

    /// Convert a content-bearing raw token into its cooked form.
    fn push_raw(&mut self, raw: RawToken, text: &str, line: u32, col: u32) -> Result<(), LexError> {
        let kind = match raw {
            // Handled by the caller before reaching here.
            RawToken::Space | RawToken::Newline => return Ok(()),

            RawToken::Directive => {
                let name = &text[1..];
                if name != "behavior" {
                    return Err(LexError::UnknownDirective {
                        name: name.to_string(),
                        line,
                    });
                }
                self.tokens
                    .push(Token::new(TokenKind::Behavior, name, line, col));
                return Ok(());
            }

            RawToken::Number => TokenKind::Number,
            RawToken::Word => TokenKind::Ident,
            RawToken::If => TokenKind::If,
            RawToken::Elif => TokenKind::Elif,
            RawToken::Else => TokenKind::Else,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Assign => TokenKind::Assign,
            RawToken::PlusEq => TokenKind::PlusAssign,
            RawToken::MinusEq => TokenKind::MinusAssign,
            RawToken::StarEq => TokenKind::StarAssign,
            RawToken::SlashEq => TokenKind::SlashAssign,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
        };
        self.tokens.push(Token::new(kind, text, line, col));
        Ok(())
    }

    /// Close the stream: final newline, dedents for open levels, `Eof`.
    fn finish(mut self) -> Result<Vec<Token>, LexError> {
        let (line, col) = self.map.line_col(self.source.len());

        let needs_newline = self
            .tokens
            .last()
            .is_some_and(|t| t.kind != TokenKind::Newline);
        if needs_newline {
            self.tokens
                .push(Token::new(TokenKind::Newline, "", line, col));
        }

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens
                .push(Token::new(TokenKind::Dedent, "", line, col));
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", line, col));
        Ok(self.tokens)
    }
}
