//! Expression evaluator.

use cellform_core::Data;

use crate::compare::compare_values;
use crate::error::EvalError;
use crate::expression::{Binary, Expression};

/// Evaluate a condition against `data`.
///
/// An empty `And` is true and an empty `Or` is false. Both stop at the
/// first member that decides the result; an error from any evaluated member
/// aborts the whole expression.
pub fn evaluate(expr: &Expression, data: &Data) -> Result<bool, EvalError> {
    match expr {
        Expression::Binary(b) => evaluate_binary(b, data),
        Expression::And { expressions } => {
            for b in expressions {
                if !evaluate_binary(b, data)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Expression::Or { expressions } => {
            for b in expressions {
                if evaluate_binary(b, data)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Evaluate a single comparison against `data`.
pub fn evaluate_binary(b: &Binary, data: &Data) -> Result<bool, EvalError> {
    compare_values(data.get(&b.left), b.operator, &b.right).map_err(|e| {
        tracing::debug!(field = %b.left, operator = %b.operator, error = %e, "condition failed");
        e
    })
}
