//! Expression parsing: precedence cascade.
//!
//! Precedence, loosest to tightest: `or` → `and` → `not` (prefix,
//! right-associative) → comparison (non-chaining) → additive →
//! multiplicative → unary minus → primary. Comparison deliberately accepts
//! at most one operator per level, so `a < b < c` does not parse.

use wisp_ast::{BinaryOp, Expr, FieldPath, UnaryOp};
use wisp_lexer::TokenKind;

use crate::error::ParseError;
use crate::stream::TokenStream;

pub(crate) fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_or(stream)
}

fn parse_or(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let mut left = parse_and(stream)?;
    while stream.eat(TokenKind::Or) {
        let right = parse_and(stream)?;
        left = Expr::binary(BinaryOp::Or, left, right);
    }
    Ok(left)
}

fn parse_and(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let mut left = parse_not(stream)?;
    while stream.eat(TokenKind::And) {
        let right = parse_not(stream)?;
        left = Expr::binary(BinaryOp::And, left, right);
    }
    Ok(left)
}

fn parse_not(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if stream.eat(TokenKind::Not) {
        let operand = parse_not(stream)?;
        return Ok(Expr::unary(UnaryOp::Not, operand));
    }
    parse_comparison(stream)
}

/// Map a token to its comparison operator.
fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::LtEq => Some(BinaryOp::Le),
        TokenKind::GtEq => Some(BinaryOp::Ge),
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::BangEq => Some(BinaryOp::Ne),
        _ => None,
    }
}

fn parse_comparison(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let left = parse_additive(stream)?;
    if let Some(op) = comparison_op(stream.peek().kind) {
        stream.advance();
        let right = parse_additive(stream)?;
        return Ok(Expr::binary(op, left, right));
    }
    Ok(left)
}

fn parse_additive(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let mut left = parse_multiplicative(stream)?;
    loop {
        let op = match stream.peek().kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            _ => break,
        };
        stream.advance();
        let right = parse_multiplicative(stream)?;
        left = Expr::binary(op, left, right);
    }
    Ok(left)
}

fn parse_multiplicative(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let mut left = parse_unary(stream)?;
    loop {
        let op = match stream.peek().kind {
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => break,
        };
        stream.advance();
        let right = parse_unary(stream)?;
        left = Expr::binary(op, left, right);
    }
    Ok(left)
}

fn parse_unary(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if stream.eat(TokenKind::Minus) {
        let operand = parse_unary(stream)?;
        return Ok(Expr::unary(UnaryOp::Neg, operand));
    }
    parse_primary(stream)
}

fn parse_primary(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    if stream.check(TokenKind::Number) {
        let token = stream.advance();
        let value: f64 = token.text.parse().map_err(|_| {
            ParseError::invalid_syntax(
                format!("invalid number literal '{}'", token.text),
                token.line,
            )
        })?;
        return Ok(Expr::Number(value));
    }

    if stream.check(TokenKind::Ident) {
        let path = parse_field_path(stream)?;
        return Ok(Expr::Field(path));
    }

    if stream.eat(TokenKind::LParen) {
        let expr = parse_expr(stream)?;
        stream.expect(TokenKind::RParen, "')'")?;
        return Ok(expr);
    }

    Err(ParseError::expected("expression", stream.peek()))
}

/// Parse a dotted-or-simple field name (`pos.x`, `rot`).
pub(crate) fn parse_field_path(stream: &mut TokenStream) -> Result<FieldPath, ParseError> {
    let name = stream.expect(TokenKind::Ident, "identifier")?.text.clone();
    if stream.eat(TokenKind::Dot) {
        let field = stream.expect(TokenKind::Ident, "field name after '.'")?;
        return Ok(FieldPath::dotted(&name, &field.text));
    }
    Ok(FieldPath::simple(name))
}
