//! Cellform value model.
//!
//! Table cells, submitted form fields and document placeholders all carry a
//! [`TypedValue`]. This crate defines those values,
//! the [`Data`] maps that hold them, and the lossy-aware [`cast`] used when
//! a value meets a column or field whose declared [`Kind`] differs from the
//! value's own.

pub mod cast;
pub mod datetime;
pub mod format;
pub mod value;

pub use cast::{cast, reconcile_row, reconcile_submission, Submission};
pub use datetime::parse_datetime;
pub use format::{DefaultFormatter, ValueFormatter};
pub use value::{Columns, Data, FileRef, Kind, SubData, TypedValue};
