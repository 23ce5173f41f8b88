// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Wisp runtime
//!
//! Executes compiled behaviors over sprite batches, once per frame.
//!
//! The interpreter is vectorized: every expression evaluates to either a
//! scalar (broadcast to all sprites) or one `f64` per sprite, and
//! conditionals narrow a per-sprite active mask rather than branching per
//! sprite. It holds no ownership over field storage; the host rebinds its
//! arrays before every execution because they may have reallocated since
//! the previous frame.
//!
//! A single execution is strictly sequential (statement order and the mask
//! stack are semantically significant), but distinct batches with their own
//! interpreters share no state and may run on separate threads.

pub mod batch;
pub mod error;
pub mod interpreter;
pub mod operators;
pub mod value;

pub use batch::{Bounds, SpriteBatch};
pub use error::{Result, RuntimeError};
pub use interpreter::{Bindings, Interpreter};
pub use value::Value;
