//! Immutable syntax trees consumed by the analyzers.
//!
//! Parse providers lower their concrete trees into this arena form so the
//! rest of the crate never touches parser-specific node types.

mod kind;
mod tree;

pub use kind::NodeKind;
pub use tree::{Ancestors, Descendants, NodeId, NodeRef, Span, SyntaxTree, TreeBuilder};
