use cellform_core::Kind;

use crate::expression::Operator;

/// Errors that can occur while evaluating a condition.
///
/// Mismatched kinds and missing fields are not errors; they resolve to a
/// boolean. These variants are the cases a caller has to tell apart from
/// "condition not satisfied".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An ordering operator was applied to a kind that only supports
    /// equality.
    #[error("operator '{operator}' not defined for {kind}; {kind} supports only eq and ne")]
    UnsupportedOperator { operator: Operator, kind: Kind },

    /// A `datetime` operand is not a calendar date-time.
    #[error("invalid datetime value '{value}'")]
    InvalidDateTime { value: String },
}
