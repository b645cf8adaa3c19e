//! Condition expressions over a [`Data`](cellform_core::Data) map.

use std::fmt;

use cellform_core::TypedValue;
use serde::{Deserialize, Serialize};

/// Comparison operator of a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Lte => "lte",
            Operator::Gte => "gte",
        }
    }

    /// Whether this operator asks for an ordering rather than equality.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `left <operator> right` where `left` names a field and `right` is a
/// literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    /// Field id looked up in the evaluation data.
    pub left: String,
    pub operator: Operator,
    pub right: TypedValue,
}

impl Binary {
    pub fn new(left: impl Into<String>, operator: Operator, right: TypedValue) -> Self {
        Binary {
            left: left.into(),
            operator,
            right,
        }
    }
}

/// A single comparison, or a flat conjunction/disjunction of comparisons.
///
/// `And` and `Or` hold comparisons only, so conditions never nest deeper
/// than one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expression {
    Binary(Binary),
    And { expressions: Vec<Binary> },
    Or { expressions: Vec<Binary> },
}

impl From<Binary> for Expression {
    fn from(b: Binary) -> Self {
        Expression::Binary(b)
    }
}
