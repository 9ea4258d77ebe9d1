//! Type declaration listing with leading documentation comments.

use super::facts::{TypeInfo, TypeKind};
use super::scope::declaration_name;
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, Visit, VisitTable};

const REPORTED_KINDS: &[NodeKind] = &[
    NodeKind::ClassDeclaration,
    NodeKind::StructDeclaration,
    NodeKind::ProtocolDeclaration,
    NodeKind::EnumDeclaration,
];

/// Lists every class, struct, protocol and enum, nested ones included.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeDeclarationExtractor;

impl TypeDeclarationExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FactExtractor for TypeDeclarationExtractor {
    type Output = Vec<TypeInfo>;

    fn name(&self) -> &'static str {
        "types"
    }

    fn extract(&self, tree: &SyntaxTree) -> Vec<TypeInfo> {
        let table = VisitTable::new().on_each(REPORTED_KINDS, |node, types: &mut Vec<TypeInfo>| {
            if let Some(info) = type_info(node) {
                types.push(info);
            }
            Visit::Descend
        });

        let mut types = Vec::new();
        walk(tree, &table, &mut types);
        types
    }
}

fn type_info(node: NodeRef<'_>) -> Option<TypeInfo> {
    let kind = match node.kind() {
        NodeKind::ClassDeclaration => TypeKind::Class,
        NodeKind::StructDeclaration => TypeKind::Struct,
        NodeKind::ProtocolDeclaration => TypeKind::Protocol,
        NodeKind::EnumDeclaration => TypeKind::Enum,
        _ => return None,
    };
    Some(TypeInfo {
        kind,
        name: declaration_name(node)?.to_string(),
        comment: leading_comment(node),
    })
}

/// The run of comments directly above a declaration, in source order.
///
/// A comment sharing a line with the end of the preceding code trails that
/// code and is not part of the run.
fn leading_comment(node: NodeRef<'_>) -> String {
    let mut run = Vec::new();
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        if sibling.kind() != NodeKind::Comment {
            break;
        }
        run.push(sibling);
        current = sibling.prev_sibling();
    }

    let trailing_line = current.map(|code| code.span().end_line);
    let mut lines: Vec<&str> = run
        .into_iter()
        .filter(|c| Some(c.span().start_line) != trailing_line)
        .map(|c| c.text().trim_end())
        .collect();
    lines.reverse();
    lines.join("\n")
}

#[cfg(all(test, feature = "tree-sitter"))]
mod tests {
    use super::*;
    use crate::analysis::parse_swift;

    fn types(source: &str) -> Vec<TypeInfo> {
        TypeDeclarationExtractor::new().extract(&parse_swift(source))
    }

    #[test]
    fn test_all_four_kinds() {
        let found = types("class A {}\nstruct B {}\nprotocol C {}\nenum D { case x }\n");
        let summary: Vec<(TypeKind, &str)> =
            found.iter().map(|t| (t.kind, t.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (TypeKind::Class, "A"),
                (TypeKind::Struct, "B"),
                (TypeKind::Protocol, "C"),
                (TypeKind::Enum, "D"),
            ]
        );
        assert!(found.iter().all(|t| t.comment.is_empty()));
    }

    #[test]
    fn test_doc_comment_is_attached() {
        let found = types("/// A router.\n/// Routes things.\nclass Router {}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].comment, "/// A router.\n/// Routes things.");
    }

    #[test]
    fn test_block_comment_is_attached() {
        let found = types("/* Shared state. */\nstruct State {}\n");
        assert_eq!(found[0].comment, "/* Shared state. */");
    }

    #[test]
    fn test_trailing_comment_of_previous_code_is_excluded() {
        let source = "import UIKit // needed for views\nstruct View {}\n";
        let found = types(source);
        assert_eq!(found[0].name, "View");
        assert_eq!(found[0].comment, "");
    }

    #[test]
    fn test_nested_types_in_preorder() {
        let source = r#"
class Outer {
    // The inner one.
    enum Inner { case a }
}
struct After {}
"#;
        let found = types(source);
        let names: Vec<&str> = found.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Outer", "Inner", "After"]);
        assert_eq!(found[1].comment, "// The inner one.");
        assert_eq!(found[2].comment, "");
    }

    #[test]
    fn test_extensions_and_actors_not_reported() {
        let found = types("struct S {}\nextension S {}\nactor Worker {}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "S");
    }
}
