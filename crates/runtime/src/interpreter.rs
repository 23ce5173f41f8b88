//! Vectorized tree-walking interpreter.
//!
//! Evaluates a compiled behavior once per frame across every sprite in a
//! batch. Expressions produce a [`Value`], either a scalar broadcast or
//! one `f64` per sprite; conditional statements narrow a per-sprite active mask
//! instead of branching per sprite: a statement writes only where the mask
//! is nonzero.
//!
//! `and`/`or` evaluate both operands eagerly. Short-circuiting is
//! impossible when either side is a per-sprite array, so the language
//! defines eager evaluation even for scalar operands.

use indexmap::IndexMap;
use tracing::trace;
use wisp_ast::{BehaviorDecl, Block, CompoundOp, Expr, FieldPath, IfStmt, Stmt};

use crate::error::{Result, RuntimeError};
use crate::operators::{apply_binary, apply_compound, apply_unary};
use crate::value::Value;

/// Mutable per-sprite field arrays for one execution.
///
/// Field storage is owned by the host batch and may reallocate between
/// frames (sprites added or removed), so bindings are rebuilt fresh before
/// every `execute` call and never outlive it.
#[derive(Default)]
pub struct Bindings<'a> {
    fields: IndexMap<&'a str, &'a mut [f64]>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mutable field under a dotted-or-simple name.
    pub fn bind(&mut self, name: &'a str, data: &'a mut [f64]) {
        self.fields.insert(name, data);
    }

    fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|data| &**data)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        self.fields.get_mut(name).map(|data| &mut **data)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.fields.iter().map(|(name, data)| (*name, &**data))
    }
}

/// Batch interpreter for compiled behaviors.
///
/// Holds the per-frame constants, the entity count, and the active-mask
/// stack. Field arrays are not held here; they arrive as [`Bindings`] on
/// every call.
#[derive(Default)]
pub struct Interpreter {
    count: usize,
    constants: IndexMap<String, f64>,
    mask: Vec<f64>,
    mask_stack: Vec<Vec<f64>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a read-only scalar broadcast to all sprites (e.g. `dt`).
    pub fn set_constant(&mut self, name: impl Into<String>, value: f64) {
        self.constants.insert(name.into(), value);
    }

    /// Fix the sprite count for the upcoming execution.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Execute a compiled behavior against the bound arrays.
    ///
    /// A no-op when the count is zero or the body is empty. Every bound
    /// field's length is validated against the count before any statement
    /// runs. On error the remainder of the frame's script is abandoned;
    /// the behavior stays valid for later frames.
    pub fn execute(&mut self, behavior: &BehaviorDecl, fields: &mut Bindings<'_>) -> Result<()> {
        if self.count == 0 || behavior.body.is_empty() {
            return Ok(());
        }

        for (name, data) in fields.iter() {
            if data.len() != self.count {
                return Err(RuntimeError::FieldLength {
                    name: name.to_string(),
                    expected: self.count,
                    actual: data.len(),
                });
            }
        }

        trace!(behavior = %behavior.name, sprites = self.count, "executing behavior");

        self.mask.clear();
        self.mask.resize(self.count, 1.0);
        self.mask_stack.clear();

        self.exec_block(&behavior.body, fields)
    }

    // ==================== Expression evaluation ====================

    fn eval(&self, expr: &Expr, fields: &Bindings<'_>) -> Result<Value> {
        match expr {
            Expr::Number(value) => Ok(Value::Scalar(*value)),

            Expr::Field(path) => self.eval_field(path, fields),

            Expr::Binary { op, left, right } => {
                let left = self.eval(left, fields)?;
                let right = self.eval(right, fields)?;
                Ok(match (left, right) {
                    // scalar OP scalar: no allocation
                    (Value::Scalar(l), Value::Scalar(r)) => Value::Scalar(apply_binary(*op, l, r)),
                    // scalar OP array: reuse the array's storage
                    (Value::Scalar(l), Value::Array(mut v)) => {
                        for x in &mut v {
                            *x = apply_binary(*op, l, *x);
                        }
                        Value::Array(v)
                    }
                    // array OP scalar: reuse the array's storage
                    (Value::Array(mut v), Value::Scalar(r)) => {
                        for x in &mut v {
                            *x = apply_binary(*op, *x, r);
                        }
                        Value::Array(v)
                    }
                    // array OP array: reuse the left operand's storage
                    (Value::Array(mut l), Value::Array(r)) => {
                        for (x, r) in l.iter_mut().zip(&r) {
                            *x = apply_binary(*op, *x, *r);
                        }
                        Value::Array(l)
                    }
                })
            }

            Expr::Unary { op, operand } => Ok(match self.eval(operand, fields)? {
                Value::Scalar(s) => Value::Scalar(apply_unary(*op, s)),
                Value::Array(mut v) => {
                    for x in &mut v {
                        *x = apply_unary(*op, *x);
                    }
                    Value::Array(v)
                }
            }),
        }
    }

    /// Resolve a field path: mutable fields first (a fresh copy of the
    /// array), then constants (a scalar, no allocation).
    fn eval_field(&self, path: &FieldPath, fields: &Bindings<'_>) -> Result<Value> {
        if let Some(data) = fields.get(path.as_str()) {
            return Ok(Value::Array(data.to_vec()));
        }
        if let Some(&value) = self.constants.get(path.as_str()) {
            return Ok(Value::Scalar(value));
        }
        Err(RuntimeError::UnknownBinding(path.as_str().to_string()))
    }

    // ==================== Statement execution ====================

    fn exec_block(&mut self, block: &Block, fields: &mut Bindings<'_>) -> Result<()> {
        for stmt in &block.stmts {
            self.exec(stmt, fields)?;
        }
        Ok(())
    }

    fn exec(&mut self, stmt: &Stmt, fields: &mut Bindings<'_>) -> Result<()> {
        match stmt {
            Stmt::Assign { target, value } => self.exec_assign(target, value, fields),
            Stmt::CompoundAssign { target, op, value } => {
                self.exec_compound_assign(target, *op, value, fields)
            }
            Stmt::If(if_stmt) => self.exec_if(if_stmt, fields),
        }
    }

    fn exec_assign(&self, target: &FieldPath, value: &Expr, fields: &mut Bindings<'_>) -> Result<()> {
        // Targets resolve before the right-hand side evaluates.
        if !fields.contains(target.as_str()) {
            return Err(RuntimeError::UnknownTarget(target.as_str().to_string()));
        }
        let rhs = self.eval(value, fields)?;

        let Some(field) = fields.get_mut(target.as_str()) else {
            return Err(RuntimeError::UnknownTarget(target.as_str().to_string()));
        };
        for i in 0..self.count {
            if self.mask[i] > 0.0 {
                field[i] = rhs.at(i);
            }
        }
        Ok(())
    }

    fn exec_compound_assign(
        &self,
        target: &FieldPath,
        op: CompoundOp,
        value: &Expr,
        fields: &mut Bindings<'_>,
    ) -> Result<()> {
        if !fields.contains(target.as_str()) {
            return Err(RuntimeError::UnknownTarget(target.as_str().to_string()));
        }
        let rhs = self.eval(value, fields)?;

        let Some(field) = fields.get_mut(target.as_str()) else {
            return Err(RuntimeError::UnknownTarget(target.as_str().to_string()));
        };
        for i in 0..self.count {
            if self.mask[i] > 0.0 {
                field[i] = apply_compound(op, field[i], rhs.at(i));
            }
        }
        Ok(())
    }

    /// Execute an if/elif/else chain by partitioning the active sprites.
    ///
    /// Each branch's condition is evaluated over the full entering mask;
    /// `remaining` tracks sprites not yet claimed, so every sprite runs at
    /// most one arm. First matching branch wins.
    fn exec_if(&mut self, stmt: &IfStmt, fields: &mut Bindings<'_>) -> Result<()> {
        let mut remaining = self.mask.clone();

        for branch in &stmt.branches {
            let cond = self.eval(&branch.condition, fields)?;

            // branch mask = remaining AND (condition != 0), reusing the
            // condition's storage when it is an array.
            let branch_mask = match cond {
                Value::Scalar(s) => {
                    let truth = if s != 0.0 { 1.0 } else { 0.0 };
                    remaining.iter().map(|rem| rem * truth).collect()
                }
                Value::Array(mut v) => {
                    for (x, rem) in v.iter_mut().zip(&remaining) {
                        *x = rem * if *x != 0.0 { 1.0 } else { 0.0 };
                    }
                    v
                }
            };

            // Claimed sprites drop out of later branches.
            for (rem, claimed) in remaining.iter_mut().zip(&branch_mask) {
                if *claimed > 0.0 {
                    *rem = 0.0;
                }
            }

            self.with_mask(branch_mask, |interp| {
                interp.exec_block(&branch.body, fields)
            })?;
        }

        if let Some(else_body) = &stmt.else_body {
            self.with_mask(remaining, |interp| interp.exec_block(else_body, fields))?;
        }

        Ok(())
    }

    /// Run `body` with `mask` installed, restoring the previous mask
    /// afterwards, also on error, so a failure mid-branch cannot leave a
    /// narrowed mask behind.
    fn with_mask<F>(&mut self, mask: Vec<f64>, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.mask_stack.push(std::mem::replace(&mut self.mask, mask));
        let result = body(self);
        if let Some(previous) = self.mask_stack.pop() {
            self.mask = previous;
        }
        result
    }
}
