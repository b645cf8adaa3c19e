use cellform_eval::EvalError;

/// Errors that can occur while compiling a document.
///
/// Missing data never fails compilation; only conditions that cannot be
/// evaluated do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A section condition could not be evaluated.
    #[error("section condition failed: {0}")]
    Condition(#[source] EvalError),

    /// A list placeholder filter could not be evaluated against one of its rows.
    #[error("filter of list placeholder '{placeholder}' failed: {source}")]
    Filter {
        placeholder: String,
        #[source]
        source: EvalError,
    },
}
