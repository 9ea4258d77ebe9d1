//! Import statement extraction.

use super::facts::ImportStatement;
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, walk_from, Visit, VisitTable};

/// Keywords that narrow an import to a single declaration.
const IMPORT_KINDS: &[&str] = &[
    "typealias", "struct", "class", "enum", "protocol", "let", "var", "func",
];

/// Lists every `import` declaration in a file, in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportExtractor;

impl ImportExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FactExtractor for ImportExtractor {
    type Output = Vec<ImportStatement>;

    fn name(&self) -> &'static str {
        "imports"
    }

    fn extract(&self, tree: &SyntaxTree) -> Vec<ImportStatement> {
        let table = VisitTable::new().on(NodeKind::ImportDeclaration, |node, imports: &mut Vec<_>| {
            imports.push(import_statement(node));
            Visit::Skip
        });

        let mut imports = Vec::new();
        walk(tree, &table, &mut imports);
        imports
    }
}

fn import_statement(node: NodeRef<'_>) -> ImportStatement {
    let path = module_path(node);
    ImportStatement {
        kind: import_kind(node).unwrap_or_default().to_string(),
        main_module: path.first().copied().unwrap_or_default().to_string(),
        submodule: path.get(1).copied().unwrap_or_default().to_string(),
    }
}

/// First narrowing keyword outside the module path.
fn import_kind(node: NodeRef<'_>) -> Option<&'static str> {
    let table = VisitTable::new()
        .on(NodeKind::QualifiedIdentifier, |_, _: &mut Option<&'static str>| Visit::Skip)
        .on(NodeKind::Token, |token, kind: &mut Option<&'static str>| {
            if kind.is_none() {
                *kind = IMPORT_KINDS.iter().copied().find(|k| *k == token.text());
            }
            Visit::Skip
        });

    let mut kind = None;
    walk_from(node, &table, &mut kind);
    kind
}

/// Dot-separated components of the imported path.
fn module_path<'t>(node: NodeRef<'t>) -> Vec<&'t str> {
    let owner = node
        .first_child_of_kind(NodeKind::QualifiedIdentifier)
        .unwrap_or(node);
    owner
        .children()
        .filter(|c| c.kind() == NodeKind::SimpleIdentifier)
        .map(|c| c.text())
        .collect()
}

#[cfg(all(test, feature = "tree-sitter"))]
mod tests {
    use super::*;
    use crate::analysis::parse_swift;

    fn imports(source: &str) -> Vec<ImportStatement> {
        ImportExtractor::new().extract(&parse_swift(source))
    }

    fn import(kind: &str, main: &str, sub: &str) -> ImportStatement {
        ImportStatement {
            kind: kind.to_string(),
            main_module: main.to_string(),
            submodule: sub.to_string(),
        }
    }

    #[test]
    fn test_kind_and_submodule() {
        assert_eq!(
            imports("import struct SomeModule.Submodule\n"),
            vec![import("struct", "SomeModule", "Submodule")]
        );
    }

    #[test]
    fn test_plain_imports_in_order() {
        let found = imports("import UIKit\nimport Foundation\n\nclass A {}\n");
        assert_eq!(
            found,
            vec![import("", "UIKit", ""), import("", "Foundation", "")]
        );
    }

    #[test]
    fn test_one_statement_per_import() {
        let source = (0..5)
            .map(|i| format!("import Module{}\n", i))
            .collect::<String>();
        let found = imports(&source);
        assert_eq!(found.len(), 5);
        assert_eq!(found[3].main_module, "Module3");
    }

    #[test]
    fn test_every_narrowing_keyword() {
        for keyword in IMPORT_KINDS {
            let source = format!("import {} Mod.Thing\n", keyword);
            assert_eq!(
                imports(&source),
                vec![import(keyword, "Mod", "Thing")],
                "keyword {:?}",
                keyword
            );
        }
    }

    #[test]
    fn test_attributed_import() {
        let found = imports("@testable import App\n");
        assert_eq!(found, vec![import("", "App", "")]);
    }

    #[test]
    fn test_deeper_paths_keep_two_components() {
        let found = imports("import A.B.C\n");
        assert_eq!(found, vec![import("", "A", "B")]);
    }

    #[test]
    fn test_no_imports() {
        assert!(imports("struct S {}\n").is_empty());
    }
}
