//! Arena-backed syntax tree.
//!
//! Nodes live in a single `Vec` owned by the tree and refer to each other by
//! index. Forward child edges are the only ownership relation; the parent
//! index is lookup metadata for upward walks.

use std::fmt;

use super::NodeKind;
use crate::parser::FileIdentity;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    #[cfg(feature = "tree-sitter")]
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }

    /// Compute a span for a byte range of `source`.
    pub fn from_byte_range(source: &[u8], start_byte: usize, end_byte: usize) -> Self {
        let (start_line, start_col) = line_col(source, start_byte);
        let (end_line, end_col) = line_col(source, end_byte);
        Self {
            start_byte,
            end_byte,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

fn line_col(source: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let col = match before.iter().rposition(|&b| b == b'\n') {
        Some(nl) => offset - nl,
        None => offset + 1,
    };
    (line, col)
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    grammar_kind: &'static str,
    field: Option<&'static str>,
    span: Span,
    parent: Option<NodeId>,
    index_in_parent: u32,
    children: Vec<NodeId>,
}

/// An immutable parsed file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    identity: FileIdentity,
    source: Vec<u8>,
    nodes: Vec<NodeData>,
    has_errors: bool,
}

impl SyntaxTree {
    pub fn identity(&self) -> &FileIdentity {
        &self.identity
    }

    /// The original source code (kept for node text extraction).
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(NodeId::ROOT)
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// First error or missing node in source order.
    pub fn first_error(&self) -> Option<NodeRef<'_>> {
        std::iter::once(self.root())
            .chain(self.root().descendants())
            .find(|n| n.kind() == NodeKind::Error)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A cheap handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    /// The tree-sitter kind this node was lowered from.
    pub fn grammar_kind(&self) -> &'static str {
        self.data().grammar_kind
    }

    /// The grammar field this node fills in its parent, if any.
    pub fn field(&self) -> Option<&'static str> {
        self.data().field
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    /// Source text covered by this node.
    pub fn text(&self) -> &'t str {
        let span = self.data().span;
        self.tree
            .source
            .get(span.start_byte..span.end_byte)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id).children.iter().map(move |&id| tree.node(id))
    }

    pub fn child_by_field(&self, field: &str) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.field() == Some(field))
    }

    pub fn children_by_field<'f>(&self, field: &'f str) -> impl Iterator<Item = NodeRef<'t>> + 'f
    where
        't: 'f,
    {
        self.children().filter(move |c| c.field() == Some(field))
    }

    pub fn first_child_of_kind(&self, kind: NodeKind) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    pub fn prev_sibling(&self) -> Option<NodeRef<'t>> {
        let data = self.data();
        let parent = data.parent?;
        let index = data.index_in_parent.checked_sub(1)?;
        let sibling = self.tree.data(parent).children[index as usize];
        Some(self.tree.node(sibling))
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'t> {
        Ancestors {
            tree: self.tree,
            next: self.data().parent,
        }
    }

    /// Strict descendants in pre-order, left to right.
    pub fn descendants(&self) -> Descendants<'t> {
        let mut stack: Vec<NodeId> = self.data().children.clone();
        stack.reverse();
        Descendants {
            tree: self.tree,
            stack,
        }
    }

    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("grammar_kind", &self.grammar_kind())
            .field("span", &self.span())
            .finish()
    }
}

pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.data(id).parent;
        Some(self.tree.node(id))
    }
}

pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.data(id).children.iter().rev().copied());
        Some(self.tree.node(id))
    }
}

/// Incremental builder used by parse providers to lower a concrete tree.
///
/// Nodes are opened with [`TreeBuilder::start_node`] and closed with
/// [`TreeBuilder::finish_node`]; children are appended in the order they
/// are started.
pub struct TreeBuilder {
    identity: FileIdentity,
    source: Vec<u8>,
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    has_errors: bool,
}

impl TreeBuilder {
    pub fn new(identity: FileIdentity, source: Vec<u8>) -> Self {
        Self {
            identity,
            source,
            nodes: Vec::new(),
            open: Vec::new(),
            has_errors: false,
        }
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Open a node as the last child of the innermost open node.
    pub fn start_node(
        &mut self,
        kind: NodeKind,
        grammar_kind: &'static str,
        field: Option<&'static str>,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.open.last().copied();
        let index_in_parent = match parent {
            Some(p) => {
                let siblings = &mut self.nodes[p.index()].children;
                siblings.push(id);
                (siblings.len() - 1) as u32
            }
            None => 0,
        };
        if kind == NodeKind::Error {
            self.has_errors = true;
        }
        self.nodes.push(NodeData {
            kind,
            grammar_kind,
            field,
            span,
            parent,
            index_in_parent,
            children: Vec::new(),
        });
        self.open.push(id);
        id
    }

    pub fn finish_node(&mut self) {
        self.open.pop();
    }

    /// Add a leaf node covering `start..end` of the source.
    pub fn leaf(
        &mut self,
        kind: NodeKind,
        grammar_kind: &'static str,
        field: Option<&'static str>,
        start: usize,
        end: usize,
    ) -> NodeId {
        let span = Span::from_byte_range(&self.source, start, end);
        let id = self.start_node(kind, grammar_kind, field, span);
        self.finish_node();
        id
    }

    /// Seal the tree. A builder with no nodes yields a bare `source_file`
    /// root over the whole source, so [`SyntaxTree::root`] always exists.
    pub fn finish(mut self) -> SyntaxTree {
        if self.nodes.is_empty() {
            self.leaf(NodeKind::SourceFile, "source_file", None, 0, self.source.len());
        }
        SyntaxTree {
            identity: self.identity,
            source: self.source,
            nodes: self.nodes,
            has_errors: self.has_errors,
        }
    }
}
