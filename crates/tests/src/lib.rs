// Test support crate: panicking on bad fixtures is the desired behavior.
#![allow(clippy::expect_used)]

//! Test harness for end-to-end Wisp execution.
//!
//! Owns the field arrays and constants a script needs, compiles source in
//! one call, and rebuilds the field bindings on every run, following the
//! same contract as a real host batch.

use indexmap::IndexMap;
use wisp::BehaviorDecl;
use wisp_runtime::{Bindings, Interpreter, Result};

pub struct TestHarness {
    behavior: BehaviorDecl,
    interpreter: Interpreter,
    fields: IndexMap<String, Vec<f64>>,
    count: usize,
}

impl TestHarness {
    /// Compile a behavior script, panicking on compile errors (tests feed
    /// known-good source).
    pub fn from_source(source: &str) -> Self {
        let behavior = wisp::compile(source).expect("fixture script failed to compile");
        Self {
            behavior,
            interpreter: Interpreter::new(),
            fields: IndexMap::new(),
            count: 0,
        }
    }

    /// Bind a mutable field with initial per-sprite values.
    ///
    /// The entity count is taken from the longest bound field.
    pub fn field(mut self, name: &str, values: &[f64]) -> Self {
        self.count = self.count.max(values.len());
        self.fields.insert(name.to_string(), values.to_vec());
        self
    }

    /// Set a read-only constant.
    pub fn constant(mut self, name: &str, value: f64) -> Self {
        self.interpreter.set_constant(name, value);
        self
    }

    /// Execute the behavior once, rebinding every field fresh.
    pub fn run(&mut self) -> Result<()> {
        self.interpreter.set_count(self.count);
        let mut bindings = Bindings::new();
        for (name, data) in self.fields.iter_mut() {
            bindings.bind(name, data);
        }
        self.interpreter.execute(&self.behavior, &mut bindings)
    }

    /// Execute the behavior `frames` times.
    pub fn run_frames(&mut self, frames: usize) -> Result<()> {
        for _ in 0..frames {
            self.run()?;
        }
        Ok(())
    }

    /// Current values of a bound field.
    pub fn get(&self, name: &str) -> &[f64] {
        self.fields
            .get(name)
            .map(Vec::as_slice)
            .expect("field was never bound")
    }

    /// Append per-sprite values to a field, growing the entity count. This
    /// is the equivalent of a host spawning sprites between frames.
    pub fn grow(&mut self, name: &str, values: &[f64]) {
        let field = self
            .fields
            .get_mut(name)
            .expect("field was never bound");
        field.extend_from_slice(values);
        self.count = self.count.max(field.len());
    }
}
