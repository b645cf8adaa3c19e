use std::path::Path;

use cellform_core::{Kind, TypedValue};

use crate::{fail, read_json, OutputFormat};

/// Prints the cast value as JSON, or `null` when the value cannot be
/// represented as `kind`. An uncastable value is not an error.
pub(crate) fn cmd_cast(value_path: &Path, kind: Kind, output: OutputFormat, quiet: bool) {
    let value: TypedValue = match read_json(value_path, "value") {
        Ok(v) => v,
        Err(msg) => fail(&msg, output, quiet),
    };

    let cast = cellform_core::cast(&value, kind);
    if cast.is_none() {
        tracing::info!(from = %value.kind(), to = %kind, "value not castable");
    }
    match serde_json::to_value(&cast) {
        Ok(v) => crate::print_json(&v),
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    }
}
