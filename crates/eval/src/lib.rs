//! Cellform condition evaluator.
//!
//! Conditions decide whether a document section is rendered, which rows of
//! a repeated list survive its filter, and whether a form field is shown.
//! An [`Expression`] is a single comparison of a field against a literal,
//! or a flat `and`/`or` of such comparisons, evaluated against a
//! [`Data`](cellform_core::Data) map with [`evaluate`].

pub mod compare;
pub mod error;
pub mod evaluate;
pub mod expression;

pub use compare::compare_values;
pub use error::EvalError;
pub use evaluate::{evaluate, evaluate_binary};
pub use expression::{Binary, Expression, Operator};
