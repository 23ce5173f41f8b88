// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! AST types for Wisp behavior scripts.
//!
//! Expression and statement kinds are closed sum types dispatched by a
//! single match in the interpreter: no virtual dispatch, exhaustiveness
//! checked by the compiler. A parsed [`BehaviorDecl`] is built once per
//! batch and immutable afterwards; the interpreter walks it every frame.
//!
//! All nodes are serde-serializable so tooling can dump a compiled
//! behavior as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary operator.
///
/// Comparisons and logic produce 1.0 for true and 0.0 for false. `And` and
/// `Or` are evaluated eagerly on both sides; short-circuiting is impossible
/// when either side is a per-sprite array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        };
        f.write_str(s)
    }
}

/// Unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Logical not: 0.0 becomes 1.0, anything else becomes 0.0.
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        })
    }
}

/// Compound assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundOp {
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl fmt::Display for CompoundOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompoundOp::AddAssign => "+=",
            CompoundOp::SubAssign => "-=",
            CompoundOp::MulAssign => "*=",
            CompoundOp::DivAssign => "/=",
        })
    }
}

/// Dotted-or-simple field name (`pos.x`, `rot`).
///
/// The canonical joined form is built once at parse time so evaluation can
/// resolve bindings without allocating. Resolution checks mutable fields
/// first, then constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    name: String,
}

impl FieldPath {
    /// A simple, undotted name (`rot`).
    pub fn simple(field: impl Into<String>) -> Self {
        Self { name: field.into() }
    }

    /// An object-qualified name (`pos` + `x` → `pos.x`).
    pub fn dotted(object: &str, field: &str) -> Self {
        Self {
            name: format!("{object}.{field}"),
        }
    }

    /// The canonical dotted name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The object segment, if the name is dotted.
    pub fn object(&self) -> Option<&str> {
        self.name.split_once('.').map(|(object, _)| object)
    }

    /// The field segment (the whole name when undotted).
    pub fn field(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(_, field)| field)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric literal; evaluates to a scalar broadcast to every sprite.
    Number(f64),
    /// Field or constant reference, resolved at evaluation time.
    Field(FieldPath),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

/// Statement node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Assign {
        target: FieldPath,
        value: Expr,
    },
    CompoundAssign {
        target: FieldPath,
        op: CompoundOp,
        value: Expr,
    },
    If(IfStmt),
}

/// Ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfBranch {
    pub condition: Expr,
    pub body: Block,
}

/// Conditional chain: `if` plus zero or more `elif` arms and an optional
/// `else` block. Each sprite is governed by at most one arm.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    pub else_body: Option<Block>,
}

/// Top-level behavior declaration: a named statement block.
///
/// Exactly one per compiled script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorDecl {
    pub name: String,
    pub body: Block,
}
