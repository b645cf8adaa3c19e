//! Best-effort coercion of typed values into a declared kind.
//!
//! Coercion is identity-only except for widening into `text`. It never
//! fails loudly: a value that cannot be represented in the target kind
//! becomes "no value". The two reconciliation passes build new maps and
//! leave their input untouched.

use std::collections::BTreeMap;

use crate::value::{Columns, Data, Kind, TypedValue};

/// Word used when a boolean is coerced into text.
pub const TRUE_WORD: &str = "Yes";
/// Word used when a boolean is coerced into text.
pub const FALSE_WORD: &str = "No";

/// Coerce `value` into `target`.
///
/// Returns the value unchanged when its kind already is `target`. Booleans
/// and numbers additionally widen into `text`. Every other combination
/// yields `None`.
pub fn cast(value: &TypedValue, target: Kind) -> Option<TypedValue> {
    if value.kind() == target {
        return Some(value.clone());
    }
    match (value, target) {
        (TypedValue::Boolean(b), Kind::Text) => {
            let word = if *b { TRUE_WORD } else { FALSE_WORD };
            Some(TypedValue::Text(word.to_string()))
        }
        (TypedValue::Number(n), Kind::Text) => Some(TypedValue::Text(n.to_string())),
        _ => None,
    }
}

/// Reconcile stored row data against the table's current column kinds.
///
/// Column kinds can change after rows were written. Values that still fit
/// their column (directly or via [`cast`]) are kept; values that no longer
/// fit, and values whose column no longer exists, are left out of the
/// result as if they had never been set.
pub fn reconcile_row(data: &Data, columns: &Columns) -> Data {
    data.iter()
        .filter_map(|(id, value)| {
            let Some(kind) = columns.get(id) else {
                tracing::debug!(field = %id, "dropping value for unknown column");
                return None;
            };
            match cast(value, *kind) {
                Some(v) => Some((id.clone(), v)),
                None => {
                    tracing::debug!(
                        field = %id,
                        stored = %value.kind(),
                        declared = %kind,
                        "dropping value that no longer matches its column"
                    );
                    None
                }
            }
        })
        .collect()
}

/// A reconciled form submission.
///
/// A key that is present with `None` means the field was submitted but its
/// value could not be represented in the field's kind. A missing key means
/// the field was not submitted at all.
pub type Submission = BTreeMap<String, Option<TypedValue>>;

/// Reconcile submitted values against the form's declared field kinds.
///
/// Submitted ids without a declared field are ignored.
pub fn reconcile_submission(submitted: &Data, fields: &Columns) -> Submission {
    fields
        .iter()
        .filter_map(|(id, kind)| {
            submitted
                .get(id)
                .map(|value| (id.clone(), cast(value, *kind)))
        })
        .collect()
}
