//! Mutable XML element tree over quick-xml.
//!
//! Parsing keeps whitespace, comments and processing instructions so that a
//! rewritten fixture differs from its source only where a fixer changed it
//! (plus a regenerated UTF-8 declaration).

mod parse;
mod tree;
mod write;

pub use tree::{Document, Element, Node, NodePath};
pub use write::XmlWriter;
