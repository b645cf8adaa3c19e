//! Kind-aware comparison of a field value against a literal.
//!
//! The order of checks matters:
//!   1. a missing field, or a field whose kind differs from the literal's,
//!      is incomparable: only `ne` holds;
//!   2. `datetime` compares chronologically;
//!   3. `number` compares numerically;
//!   4. every other kind supports `eq`/`ne` only, and an ordering operator
//!      is an error rather than `false`.

use std::cmp::Ordering;

use cellform_core::{parse_datetime, TypedValue};

use crate::error::EvalError;
use crate::expression::Operator;

/// Compare `left` (the looked-up field value, if any) with `right`.
pub fn compare_values(
    left: Option<&TypedValue>,
    op: Operator,
    right: &TypedValue,
) -> Result<bool, EvalError> {
    let left = match left {
        Some(l) if l.kind() == right.kind() => l,
        _ => return Ok(op == Operator::Ne),
    };

    match (left, right) {
        (TypedValue::DateTime(l), TypedValue::DateTime(r)) => {
            let l = parse_operand(l)?;
            let r = parse_operand(r)?;
            Ok(apply_ordering(l.cmp(&r), op))
        }
        (TypedValue::Number(l), TypedValue::Number(r)) => Ok(apply_ordering(l.cmp(r), op)),
        _ => {
            if op.is_ordering() {
                return Err(EvalError::UnsupportedOperator {
                    operator: op,
                    kind: left.kind(),
                });
            }
            let equal = left == right;
            Ok(if op == Operator::Eq { equal } else { !equal })
        }
    }
}

fn parse_operand(raw: &str) -> Result<time::OffsetDateTime, EvalError> {
    parse_datetime(raw).ok_or_else(|| EvalError::InvalidDateTime {
        value: raw.to_string(),
    })
}

fn apply_ordering(ord: Ordering, op: Operator) -> bool {
    match op {
        Operator::Eq => ord == Ordering::Equal,
        Operator::Ne => ord != Ordering::Equal,
        Operator::Lt => ord == Ordering::Less,
        Operator::Gt => ord == Ordering::Greater,
        Operator::Lte => ord != Ordering::Greater,
        Operator::Gte => ord != Ordering::Less,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
