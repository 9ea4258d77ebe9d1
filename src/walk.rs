//! Depth-first traversal with per-node-kind continuation control.
//!
//! A [`VisitTable`] maps node kinds to handlers. Each handler receives the
//! node and the walk's accumulator and decides whether the walk descends
//! into the node's children. Kinds without a handler always descend.
//!
//! ```text
//! source_file            visit order: source_file, class Foo, init,
//! ├── class Foo            struct Bar (Skip), class Baz
//! │   └── init
//! ├── struct Bar  <- Skip: children never visited
//! │   └── init
//! └── class Baz
//! ```

use std::collections::HashMap;

use crate::syntax::{NodeKind, NodeRef, SyntaxTree};

/// Continuation decision returned by a visit handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the node's children next.
    Descend,
    /// Prune the node's subtree.
    Skip,
}

type Handler<'h, A> = Box<dyn Fn(NodeRef<'_>, &mut A) -> Visit + 'h>;

/// Dispatch table from node kinds to visit handlers.
///
/// `A` is the accumulator threaded through the walk; handlers read their
/// query from captured state and write results only through `&mut A`.
pub struct VisitTable<'h, A> {
    handlers: HashMap<NodeKind, Handler<'h, A>>,
}

impl<'h, A> VisitTable<'h, A> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `kind`, replacing any earlier registration.
    pub fn on<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: Fn(NodeRef<'_>, &mut A) -> Visit + 'h,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Register the same handler for several kinds.
    pub fn on_each<F>(mut self, kinds: &[NodeKind], handler: F) -> Self
    where
        F: Fn(NodeRef<'_>, &mut A) -> Visit + Clone + 'h,
    {
        for &kind in kinds {
            self = self.on(kind, handler.clone());
        }
        self
    }

    pub fn handles(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    fn visit(&self, node: NodeRef<'_>, acc: &mut A) -> Visit {
        match self.handlers.get(&node.kind()) {
            Some(handler) => handler(node, acc),
            None => Visit::Descend,
        }
    }
}

impl<A> Default for VisitTable<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the whole tree in pre-order, children left to right.
pub fn walk<A>(tree: &SyntaxTree, table: &VisitTable<'_, A>, acc: &mut A) {
    walk_from(tree.root(), table, acc);
}

/// Walk the subtree rooted at `start` (inclusive).
pub fn walk_from<A>(start: NodeRef<'_>, table: &VisitTable<'_, A>, acc: &mut A) {
    // Explicit stack: nesting depth of real sources must not bound recursion.
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if table.visit(node, acc) == Visit::Skip {
            continue;
        }
        let first_child = stack.len();
        stack.extend(node.children());
        stack[first_child..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FileIdentity;
    use crate::syntax::{Span, TreeBuilder};

    /// source_file > [class "A" > [init], struct "B" > [init], class "C"]
    fn sample_tree() -> SyntaxTree {
        let source = b"A i B i C".to_vec();
        let mut b = TreeBuilder::new(FileIdentity::new("Sample.swift"), source);
        let all = Span::from_byte_range(b.source(), 0, 9);
        b.start_node(NodeKind::SourceFile, "source_file", None, all);

        b.start_node(
            NodeKind::ClassDeclaration,
            "class_declaration",
            None,
            Span::from_byte_range(b.source(), 0, 3),
        );
        b.leaf(NodeKind::TypeIdentifier, "type_identifier", Some("name"), 0, 1);
        b.leaf(NodeKind::InitializerDeclaration, "init_declaration", None, 2, 3);
        b.finish_node();

        b.start_node(
            NodeKind::StructDeclaration,
            "class_declaration",
            None,
            Span::from_byte_range(b.source(), 4, 7),
        );
        b.leaf(NodeKind::TypeIdentifier, "type_identifier", Some("name"), 4, 5);
        b.leaf(NodeKind::InitializerDeclaration, "init_declaration", None, 6, 7);
        b.finish_node();

        b.start_node(
            NodeKind::ClassDeclaration,
            "class_declaration",
            None,
            Span::from_byte_range(b.source(), 8, 9),
        );
        b.leaf(NodeKind::TypeIdentifier, "type_identifier", Some("name"), 8, 9);
        b.finish_node();

        b.finish_node();
        b.finish()
    }

    #[test]
    fn test_preorder_visit_order() {
        let tree = sample_tree();
        let table = VisitTable::new().on_each(
            &[
                NodeKind::SourceFile,
                NodeKind::ClassDeclaration,
                NodeKind::StructDeclaration,
                NodeKind::TypeIdentifier,
                NodeKind::InitializerDeclaration,
            ],
            |node: NodeRef<'_>, seen: &mut Vec<String>| {
                seen.push(format!("{}:{}", node.kind(), node.text()));
                Visit::Descend
            },
        );

        let mut seen = Vec::new();
        walk(&tree, &table, &mut seen);
        assert_eq!(seen.len(), tree.len());
        assert_eq!(seen[0], "source_file:A i B i C");
        assert_eq!(seen[1], "class_declaration:A i");
        assert_eq!(seen[2], "type_identifier:A");
        assert_eq!(seen[3], "initializer_declaration:i");
        assert_eq!(seen[4], "struct_declaration:B i");
    }

    #[test]
    fn test_skip_prunes_subtree() {
        let tree = sample_tree();
        let table = VisitTable::new()
            .on(NodeKind::StructDeclaration, |_, _: &mut Vec<usize>| Visit::Skip)
            .on(NodeKind::InitializerDeclaration, |node, inits: &mut Vec<usize>| {
                inits.push(node.span().start_byte);
                Visit::Descend
            });

        let mut inits = Vec::new();
        walk(&tree, &table, &mut inits);
        assert_eq!(inits, vec![2]);
    }

    #[test]
    fn test_unregistered_kinds_descend() {
        let tree = sample_tree();
        let table = VisitTable::new().on(NodeKind::TypeIdentifier, |node, names: &mut Vec<String>| {
            names.push(node.text().to_string());
            Visit::Skip
        });
        assert!(table.handles(NodeKind::TypeIdentifier));
        assert!(!table.handles(NodeKind::ClassDeclaration));

        let mut names = Vec::new();
        walk(&tree, &table, &mut names);
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_walk_from_subtree() {
        let tree = sample_tree();
        let strukt = tree
            .root()
            .children()
            .find(|n| n.kind() == NodeKind::StructDeclaration)
            .unwrap();
        let mut count = 0usize;
        let counting = VisitTable::new().on_each(
            &[NodeKind::TypeIdentifier, NodeKind::InitializerDeclaration],
            |_, count: &mut usize| {
                *count += 1;
                Visit::Descend
            },
        );
        walk_from(strukt, &counting, &mut count);
        assert_eq!(count, 2);
    }
}
