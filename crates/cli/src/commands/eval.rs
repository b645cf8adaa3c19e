use std::path::Path;

use cellform_core::Data;
use cellform_eval::Expression;

use crate::{fail, read_json, OutputFormat};

pub(crate) fn cmd_eval(expression_path: &Path, data_path: &Path, output: OutputFormat, quiet: bool) {
    let expression: Expression = match read_json(expression_path, "expression") {
        Ok(e) => e,
        Err(msg) => fail(&msg, output, quiet),
    };
    let data: Data = match read_json(data_path, "data") {
        Ok(d) => d,
        Err(msg) => fail(&msg, output, quiet),
    };

    match cellform_eval::evaluate(&expression, &data) {
        Ok(result) => match output {
            OutputFormat::Json => crate::print_json(&serde_json::json!({ "result": result })),
            OutputFormat::Text => println!("{}", result),
        },
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    }
}
