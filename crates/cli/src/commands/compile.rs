use std::path::Path;

use cellform_codegen::{CompileContext, Compiler, Doc};
use cellform_core::{Data, SubData};

use crate::config::Config;
use crate::{fail, read_json, OutputFormat};

pub(crate) struct CompileOptions<'a> {
    pub document: &'a Path,
    pub data: Option<&'a Path>,
    pub sub_data: Option<&'a Path>,
    pub out: Option<&'a Path>,
    pub config: &'a Config,
}

pub(crate) fn cmd_compile(opts: CompileOptions<'_>, output: OutputFormat, quiet: bool) {
    let doc: Doc = match read_json(opts.document, "document") {
        Ok(d) => d,
        Err(msg) => fail(&msg, output, quiet),
    };
    let data: Data = match opts.data {
        Some(path) => match read_json(path, "data") {
            Ok(d) => d,
            Err(msg) => fail(&msg, output, quiet),
        },
        None => Data::new(),
    };
    let sub_data: Option<SubData> = match opts.sub_data {
        Some(path) => match read_json(path, "sub-data") {
            Ok(s) => Some(s),
            Err(msg) => fail(&msg, output, quiet),
        },
        None => None,
    };

    let mut ctx = CompileContext::new(&data);
    if let Some(sub) = &sub_data {
        ctx = ctx.with_sub_data(sub);
    }

    let compiler = Compiler::with_formatter(opts.config.formatter());
    let markup = match compiler.compile(&doc, &ctx) {
        Ok(m) => m,
        Err(e) => fail(&format!("error: {}", e), output, quiet),
    };

    match opts.out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &markup) {
                fail(
                    &format!("error: could not write {}: {}", path.display(), e),
                    output,
                    quiet,
                );
            }
            if !quiet {
                match output {
                    OutputFormat::Json => crate::print_json(&serde_json::json!({
                        "written": path.display().to_string(),
                        "bytes": markup.len(),
                    })),
                    OutputFormat::Text => eprintln!("wrote {}", path.display()),
                }
            }
        }
        None => match output {
            OutputFormat::Json => crate::print_json(&serde_json::json!({ "markup": markup })),
            OutputFormat::Text => print!("{}", markup),
        },
    }
}
