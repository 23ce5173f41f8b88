// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Lexical analysis for Wisp behavior scripts.
//!
//! Tokenization runs in two layers:
//!
//! - A raw scan (derived with logos) recognizes numbers, identifiers,
//!   keywords, operators, and delimiters. Comments are stripped during
//!   lexing (not tokens). Whitespace runs and line breaks survive the raw
//!   scan because the cooking pass needs them.
//! - A cooking pass walks the spanned raw stream, tracks the
//!   indentation stack, and produces the final [`Token`] sequence with
//!   synthetic `Newline`/`Indent`/`Dedent` tokens and 1-based line/column
//!   positions. Blank and comment-only lines are structurally invisible.
//!
//! # Examples
//!
//! ```
//! use wisp_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("@behavior b:\n    x = 1\n").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Behavior);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

use logos::Logos;

mod cook;
mod error;
mod source_map;

pub use error::LexError;
pub use source_map::SourceMap;

/// Raw lexical token produced by the logos scanner.
///
/// Whitespace and line breaks are kept as tokens here; the cooking pass
/// consumes them to drive indentation tracking and discards them from the
/// final stream.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"#[^\n]*")] // Line comments
#[logos(skip r"\r")] // Stray carriage returns
pub(crate) enum RawToken {
    /// Run of inline whitespace. Significant only at the start of a line.
    #[regex(r"[ \t]+")]
    Space,
    /// Line break.
    #[regex(r"\r?\n")]
    Newline,

    /// Numeric literal: digits with an optional single decimal point.
    /// A trailing point is legal (`5.` reads as 5.0).
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,
    /// Identifier.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    /// `@` directive. Only `@behavior` is valid; the cooking pass rejects
    /// anything else.
    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*")]
    Directive,

    // Keywords
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    // Compound assignment
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Assignment & delimiters
    #[token("=")]
    Assign,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
}

/// Kind of a cooked token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    Ident,

    // Keywords
    If,
    Elif,
    Else,
    And,
    Or,
    Not,
    /// `@behavior` directive.
    Behavior,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    BangEq,

    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,

    // Delimiters
    LParen,
    RParen,
    Colon,
    Dot,
    Comma,

    // Structure (synthetic; never produced by the raw scan)
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Behavior => "@behavior",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Cooked token with source position.
///
/// `text` holds the literal source text for numbers, identifiers, and
/// operators; synthetic structural tokens carry an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub col: u32,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    /// Diagnostic-friendly rendering: literal text where there is any,
    /// the kind's description for structural tokens.
    pub fn describe(&self) -> &str {
        if self.text.is_empty() {
            self.kind.describe()
        } else {
            &self.text
        }
    }
}

/// Tokenize a full behavior script.
///
/// Returns the cooked token sequence, always terminated by an `Eof` token.
/// Fails on unknown characters, a bare `!`, an unrecognized `@` directive,
/// or inconsistent indentation, citing the offending line.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    cook::Cooker::new(source).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: tokenize and return the kinds only.
    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    use TokenKind::*;

    #[test]
    fn keywords_and_identifiers() {
        let tokens = tokenize("if elif else and or not wander x_1\n").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![If, Elif, Else, And, Or, Not, Ident, Ident, Newline, Eof]
        );
        assert_eq!(tokens[6].text, "wander");
        assert_eq!(tokens[7].text, "x_1");
    }

    #[test]
    fn numbers_keep_literal_text() {
        let tokens = tokenize("1 2.5 5. 0.25\n").unwrap();
        let texts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["1", "2.5", "5.", "0.25"]);
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("+ - * / % < > <= >= == != = += -= *= /= ( ) : . ,\n"),
            vec![
                Plus,
                Minus,
                Star,
                Slash,
                Percent,
                Lt,
                Gt,
                LtEq,
                GtEq,
                EqEq,
                BangEq,
                Assign,
                PlusAssign,
                MinusAssign,
                StarAssign,
                SlashAssign,
                LParen,
                RParen,
                Colon,
                Dot,
                Comma,
                Newline,
                Eof,
            ]
        );
    }

    #[test]
    fn indent_dedent_pairing() {
        let source = "@behavior b:\n    x = 1\n    if x > 0:\n        x = 2\n    y = 3\n";
        assert_eq!(
            kinds(source),
            vec![
                Behavior, Ident, Colon, Newline, // @behavior b:
                Indent, Ident, Assign, Number, Newline, // x = 1
                If, Ident, Gt, Number, Colon, Newline, // if x > 0:
                Indent, Ident, Assign, Number, Newline, // x = 2
                Dedent, Ident, Assign, Number, Newline, // y = 3
                Dedent, Eof,
            ]
        );
    }

    #[test]
    fn tabs_count_as_four_spaces() {
        // Tab-indented block dedenting to a 4-space line is consistent.
        let source = "@behavior b:\n\tx = 1\n    y = 2\n";
        assert_eq!(
            kinds(source),
            vec![
                Behavior, Ident, Colon, Newline, Indent, Ident, Assign, Number, Newline, Ident,
                Assign, Number, Newline, Dedent, Eof,
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_invisible() {
        let source = "@behavior b:\n\n    # setup\n    x = 1\n\n    y = 2\n";
        assert_eq!(
            kinds(source),
            vec![
                Behavior, Ident, Colon, Newline, Indent, Ident, Assign, Number, Newline, Ident,
                Assign, Number, Newline, Dedent, Eof,
            ]
        );
    }

    #[test]
    fn trailing_comment_does_not_eat_newline() {
        assert_eq!(
            kinds("x = 1  # set x\ny = 2\n"),
            vec![Ident, Assign, Number, Newline, Ident, Assign, Number, Newline, Eof]
        );
    }

    #[test]
    fn missing_final_newline_is_synthesized() {
        assert_eq!(kinds("x = 1"), vec![Ident, Assign, Number, Newline, Eof]);
    }

    #[test]
    fn all_open_blocks_close_at_eof() {
        let source = "@behavior b:\n    if x:\n        y = 1";
        assert_eq!(
            kinds(source),
            vec![
                Behavior, Ident, Colon, Newline, Indent, If, Ident, Colon, Newline, Indent, Ident,
                Assign, Number, Newline, Dedent, Dedent, Eof,
            ]
        );
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![Eof]);
        assert_eq!(kinds("\n\n# only comments\n"), vec![Eof]);
    }

    #[test]
    fn inconsistent_dedent_fails() {
        // Dedents to width 2, which never appeared on the stack.
        let source = "@behavior b:\n    x = 1\n  y = 2\n";
        let err = tokenize(source).unwrap_err();
        assert_eq!(err, LexError::InconsistentIndentation { line: 3 });
    }

    #[test]
    fn lone_bang_fails_with_hint() {
        let err = tokenize("x = 1 ! 2\n").unwrap_err();
        assert!(matches!(err, LexError::LoneBang { line: 1 }));
        assert!(err.to_string().contains("!="));
    }

    #[test]
    fn unknown_directive_fails() {
        let err = tokenize("@update foo:\n").unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownDirective {
                name: "update".into(),
                line: 1
            }
        );
    }

    #[test]
    fn unknown_character_fails_with_text() {
        let err = tokenize("x = $\n").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                text: "$".into(),
                line: 1
            }
        );
    }

    #[test]
    fn token_positions_are_one_based() {
        let tokens = tokenize("x = 1\n  ").unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 3));
        assert_eq!((tokens[2].line, tokens[2].col), (1, 5));
    }
}
