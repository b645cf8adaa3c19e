use std::path::Path;

use cellform_core::{Columns, Data};

use crate::{fail, read_json, OutputFormat};

pub(crate) fn cmd_reconcile(
    data_path: &Path,
    columns_path: &Path,
    submission: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let data: Data = match read_json(data_path, "data") {
        Ok(d) => d,
        Err(msg) => fail(&msg, output, quiet),
    };
    let columns: Columns = match read_json(columns_path, "columns") {
        Ok(c) => c,
        Err(msg) => fail(&msg, output, quiet),
    };

    // Submissions keep an explicit null for every declared field that could
    // not be cast, so the caller can clear the stored value.
    let json = if submission {
        serde_json::to_value(cellform_core::reconcile_submission(&data, &columns))
    } else {
        serde_json::to_value(cellform_core::reconcile_row(&data, &columns))
    };
    match json {
        Ok(v) => crate::print_json(&v),
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    }
}
