//! Scalar/array value duality.

/// Result of evaluating one expression over a sprite batch.
///
/// A scalar is conceptually broadcast to every sprite; an array holds one
/// element per sprite. The split exists purely so scalar-only
/// sub-expressions never allocate. Array storage is consumed by the next
/// operation and reused in place: a `Value` is moved through evaluation,
/// never retained past the expression that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Array(Vec<f64>),
}

impl Value {
    /// The value seen by sprite `i`.
    ///
    /// Callers index only within the validated entity count.
    pub fn at(&self, i: usize) -> f64 {
        match self {
            Value::Scalar(s) => *s,
            Value::Array(v) => v[i],
        }
    }

    /// Whether this value is a scalar broadcast.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }
}
