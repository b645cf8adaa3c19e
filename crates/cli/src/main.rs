mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use cellform_core::Kind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Cellform typed-value and document toolkit.
#[derive(Parser)]
#[command(
    name = "cellform",
    version,
    about = "Cellform typed-value and document toolkit"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a condition expression against row data
    Eval {
        /// Path to the expression JSON file
        expression: PathBuf,
        /// Path to the data JSON file
        #[arg(long)]
        data: PathBuf,
    },

    /// Coerce a typed value into another kind
    Cast {
        /// Path to the typed value JSON file
        value: PathBuf,
        /// Target kind (text, number, boolean, date, datetime, choice, choiceList, file)
        #[arg(long, value_parser = parse_kind)]
        kind: Kind,
    },

    /// Reconcile stored row data (or a form submission) against declared kinds
    Reconcile {
        /// Path to the data JSON file
        data: PathBuf,
        /// Path to a JSON object mapping field ids to kinds
        #[arg(long)]
        columns: PathBuf,
        /// Treat the data as a form submission instead of a stored row
        #[arg(long)]
        submission: bool,
    },

    /// Compile a document to Typst markup
    Compile {
        /// Path to the document JSON file
        document: PathBuf,
        /// Path to the data JSON file
        #[arg(long)]
        data: Option<PathBuf>,
        /// Path to the sub-data JSON file (rows for list placeholders)
        #[arg(long)]
        sub_data: Option<PathBuf>,
        /// Write the markup to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_kind(s: &str) -> Result<Kind, String> {
    s.parse()
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => fail(&format!("error: {}", msg), cli.output, cli.quiet),
    };

    match cli.command {
        Commands::Eval { expression, data } => {
            commands::eval::cmd_eval(&expression, &data, cli.output, cli.quiet);
        }
        Commands::Cast { value, kind } => {
            commands::cast::cmd_cast(&value, kind, cli.output, cli.quiet);
        }
        Commands::Reconcile {
            data,
            columns,
            submission,
        } => {
            commands::reconcile::cmd_reconcile(&data, &columns, submission, cli.output, cli.quiet);
        }
        Commands::Compile {
            document,
            data,
            sub_data,
            out,
        } => {
            commands::compile::cmd_compile(
                commands::compile::CompileOptions {
                    document: &document,
                    data: data.as_deref(),
                    sub_data: sub_data.as_deref(),
                    out: out.as_deref(),
                    config: &config,
                },
                cli.output,
                cli.quiet,
            );
        }
    }
}

/// Read and deserialize a JSON input file.
///
/// `what` names the input in error messages ("data", "document", ...).
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| format!("error: {} file not found: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("error: invalid {} in {}: {}", what, path.display(), e))
}

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report `msg` and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}
