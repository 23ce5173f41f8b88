//! Statement, block, and behavior-declaration parsing.

use wisp_ast::{BehaviorDecl, Block, CompoundOp, IfBranch, IfStmt, Stmt};
use wisp_lexer::TokenKind;

use crate::error::ParseError;
use crate::expr::{parse_expr, parse_field_path};
use crate::stream::TokenStream;

/// Parse the top-level `@behavior <name>:` declaration and its body.
pub(crate) fn parse_behavior(stream: &mut TokenStream) -> Result<BehaviorDecl, ParseError> {
    stream.expect(TokenKind::Behavior, "@behavior")?;
    let name = stream
        .expect(TokenKind::Ident, "behavior name")?
        .text
        .clone();
    stream.expect(TokenKind::Colon, "':'")?;
    stream.expect(TokenKind::Newline, "newline after ':'")?;
    let body = parse_block(stream)?;
    Ok(BehaviorDecl { name, body })
}

/// Parse an indented block: `Indent`, statements until `Dedent`/`Eof`,
/// consuming the closing `Dedent` if present.
fn parse_block(stream: &mut TokenStream) -> Result<Block, ParseError> {
    stream.expect(TokenKind::Indent, "indented block")?;

    let mut block = Block::default();
    while !stream.check(TokenKind::Dedent) && !stream.at_end() {
        stream.skip_newlines();
        if stream.check(TokenKind::Dedent) || stream.at_end() {
            break;
        }
        block.stmts.push(parse_statement(stream)?);
    }

    stream.eat(TokenKind::Dedent);
    Ok(block)
}

fn parse_statement(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    if stream.check(TokenKind::If) {
        return parse_if(stream);
    }
    parse_assignment(stream)
}

fn parse_if(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let mut stmt = IfStmt::default();

    stream.expect(TokenKind::If, "'if'")?;
    stmt.branches.push(parse_branch(stream)?);

    stream.skip_newlines();
    while stream.eat(TokenKind::Elif) {
        stmt.branches.push(parse_branch(stream)?);
        stream.skip_newlines();
    }

    if stream.eat(TokenKind::Else) {
        stream.expect(TokenKind::Colon, "':'")?;
        stream.expect(TokenKind::Newline, "newline")?;
        stmt.else_body = Some(parse_block(stream)?);
    }

    Ok(Stmt::If(stmt))
}

/// Parse `<condition>: NEWLINE <block>` for an `if` or `elif` arm.
fn parse_branch(stream: &mut TokenStream) -> Result<IfBranch, ParseError> {
    let condition = parse_expr(stream)?;
    stream.expect(TokenKind::Colon, "':'")?;
    stream.expect(TokenKind::Newline, "newline")?;
    let body = parse_block(stream)?;
    Ok(IfBranch { condition, body })
}

/// Map a token to its compound assignment operator.
fn compound_op(kind: TokenKind) -> Option<CompoundOp> {
    match kind {
        TokenKind::PlusAssign => Some(CompoundOp::AddAssign),
        TokenKind::MinusAssign => Some(CompoundOp::SubAssign),
        TokenKind::StarAssign => Some(CompoundOp::MulAssign),
        TokenKind::SlashAssign => Some(CompoundOp::DivAssign),
        _ => None,
    }
}

/// Parse an assignment statement, speculatively.
///
/// The grammar has no bare-expression statement: a statement that is not an
/// `if` chain must be `name [. name] (= | += | -= | *= | /=) expr NEWLINE`.
/// If no assignment operator follows the (possibly dotted) name, the stream
/// rewinds to where the statement began and parsing fails.
fn parse_assignment(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    if stream.check(TokenKind::Ident) {
        let saved = stream.position();
        let target = parse_field_path(stream)?;

        if let Some(op) = compound_op(stream.peek().kind) {
            stream.advance();
            let value = parse_expr(stream)?;
            stream.expect(TokenKind::Newline, "newline")?;
            return Ok(Stmt::CompoundAssign { target, op, value });
        }

        if stream.eat(TokenKind::Assign) {
            let value = parse_expr(stream)?;
            stream.expect(TokenKind::Newline, "newline")?;
            return Ok(Stmt::Assign { target, value });
        }

        // Not an assignment after all.
        stream.rewind(saved);
    }

    Err(ParseError::expected("assignment statement", stream.peek()))
}
