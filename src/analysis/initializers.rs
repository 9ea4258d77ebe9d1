//! Initializer signature extraction.

use std::collections::BTreeSet;

use super::facts::{InitializerStatement, Modifier, Parameter};
use super::scope::{modifier_keywords, scoped_to, within_type_scope};
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, Visit};

/// Lists the initializers declared in a named type and its extensions.
#[derive(Debug, Clone)]
pub struct InitializerExtractor {
    type_name: String,
}

impl InitializerExtractor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl FactExtractor for InitializerExtractor {
    type Output = Vec<InitializerStatement>;

    fn name(&self) -> &'static str {
        "initializers"
    }

    fn extract(&self, tree: &SyntaxTree) -> Vec<InitializerStatement> {
        let table = scoped_to(&self.type_name).on(
            NodeKind::InitializerDeclaration,
            |node, inits: &mut Vec<InitializerStatement>| {
                if within_type_scope(node) {
                    inits.push(self.statement(node));
                }
                Visit::Descend
            },
        );

        let mut inits = Vec::new();
        walk(tree, &table, &mut inits);
        inits
    }
}

impl InitializerExtractor {
    fn statement(&self, node: NodeRef<'_>) -> InitializerStatement {
        InitializerStatement {
            type_name: self.type_name.clone(),
            parameters: node
                .children()
                .filter(|c| c.kind() == NodeKind::Parameter)
                .map(parameter)
                .collect(),
            modifiers: initializer_modifiers(node),
        }
    }
}

fn parameter(node: NodeRef<'_>) -> Parameter {
    let name = node
        .child_by_field("name")
        .or_else(|| node.child_by_field("external_name"))
        .map(|n| n.text().to_string())
        .unwrap_or_default();

    let mut type_names: Vec<String> = node
        .children_by_field("type")
        .flat_map(|t| std::iter::once(t).chain(t.descendants()))
        .filter(|t| t.kind() == NodeKind::TypeIdentifier)
        .map(|t| t.text().to_string())
        .collect();
    if type_names.is_empty() {
        type_names = node
            .descendants()
            .filter(|t| t.kind() == NodeKind::TypeIdentifier)
            .map(|t| t.text().to_string())
            .collect();
    }

    Parameter { name, type_names }
}

/// Declared modifiers, plus `designated` unless the initializer is a
/// convenience one.
fn initializer_modifiers(node: NodeRef<'_>) -> BTreeSet<Modifier> {
    let Some(keywords) = modifier_keywords(node) else {
        return BTreeSet::from([Modifier::Designated]);
    };

    let mut modifiers: BTreeSet<Modifier> = keywords.filter_map(Modifier::from_keyword).collect();
    if !modifiers.contains(&Modifier::Convenience) {
        modifiers.insert(Modifier::Designated);
    }
    modifiers
}

#[cfg(all(test, feature = "tree-sitter"))]
mod tests {
    use super::*;
    use crate::analysis::parse_swift;

    fn inits(type_name: &str, source: &str) -> Vec<InitializerStatement> {
        InitializerExtractor::new(type_name).extract(&parse_swift(source))
    }

    fn param(name: &str, types: &[&str]) -> Parameter {
        Parameter {
            name: name.to_string(),
            type_names: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_designated_initializer() {
        let found = inits("Foo", "class Foo { init(bar: Int) {} }\n");
        assert_eq!(
            found,
            vec![InitializerStatement {
                type_name: "Foo".to_string(),
                parameters: vec![param("bar", &["Int"])],
                modifiers: BTreeSet::from([Modifier::Designated]),
            }]
        );
    }

    #[test]
    fn test_convenience_and_access_modifiers() {
        let source = r#"
class Foo {
    public init() {}
    private convenience init(name: String) { self.init() }
}
"#;
        let found = inits("Foo", source);
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0].modifiers,
            BTreeSet::from([Modifier::Public, Modifier::Designated])
        );
        assert!(found[0].parameters.is_empty());
        assert_eq!(
            found[1].modifiers,
            BTreeSet::from([Modifier::Private, Modifier::Convenience])
        );
        assert!(found[1].is_convenience());
    }

    #[test]
    fn test_other_types_are_pruned() {
        let source = r#"
struct Bar { init(x: Int) {} }
class Foo { init(y: Double) {} }
"#;
        let found = inits("Foo", source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parameters, vec![param("y", &["Double"])]);
    }

    #[test]
    fn test_extension_initializers_count() {
        let source = "struct Foo {}\nextension Foo {\n    init(value: String) {}\n}\n";
        let found = inits("Foo", source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parameters, vec![param("value", &["String"])]);
    }

    #[test]
    fn test_external_and_internal_names() {
        let source = "class Foo { init(with value: Int, _ other: String) {} }\n";
        let found = inits("Foo", source);
        assert_eq!(
            found[0].parameters,
            vec![param("value", &["Int"]), param("other", &["String"])]
        );
    }

    #[test]
    fn test_generic_and_optional_types() {
        let source = "class Foo { init(items: [String: Int], handler: Handler?) {} }\n";
        let found = inits("Foo", source);
        assert_eq!(
            found[0].parameters,
            vec![param("items", &["String", "Int"]), param("handler", &["Handler"])]
        );
    }

    #[test]
    fn test_same_named_scopes_are_all_visited() {
        let source = r#"
struct Foo { init(a: Int) {} }
enum Wrapper {
    class Foo { init(b: Int) {} }
}
struct Foo { init(c: Int) {} }
"#;
        let found = inits("Foo", source);
        let names: Vec<&str> = found
            .iter()
            .flat_map(|i| i.parameters.iter().map(|p| p.name.as_str()))
            .collect();
        // The nested Foo sits inside a non-matching scope and is pruned.
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_initializer_modifier_sets_are_exclusive() {
        let source = r#"
class Foo {
    required init() {}
    public convenience init(x: Int) { self.init() }
    internal init(y: Int) {}
}
"#;
        for init in inits("Foo", source) {
            let convenience = init.modifiers.contains(&Modifier::Convenience);
            let designated = init.modifiers.contains(&Modifier::Designated);
            assert!(convenience != designated, "{:?}", init.modifiers);
        }
    }

    #[test]
    fn test_type_without_initializers() {
        assert!(inits("Foo", "class Foo { func run() {} }\n").is_empty());
        assert!(inits("Missing", "class Foo { init() {} }\n").is_empty());
    }
}
