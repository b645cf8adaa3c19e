//! Cellform document compiler.
//!
//! Turns a rich-document tree (as produced by the document editor) into
//! Typst markup. Sections are included or dropped by evaluating their
//! condition; list placeholders repeat their template once per row of the
//! matching sub-data entry; text placeholders are filled in through a
//! [`ValueFormatter`](cellform_core::ValueFormatter).
//!
//! The compiler is a pure function of its inputs and never mutates the
//! tree it is given.

pub mod compile;
pub mod document;
pub mod error;
pub mod escape;
pub mod markup;

pub use compile::{compile, CompileContext, Compiler};
pub use document::{
    Block, Doc, DocAttrs, Heading, Inline, ItemBlock, List, ListItem, ListPlaceholder, Mark,
    Paragraph, Section, TextAlign, TopLevelNode,
};
pub use error::CompileError;
pub use escape::escape;
