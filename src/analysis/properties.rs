//! Property extraction for a named type.

use std::collections::BTreeSet;

use super::facts::{Modifier, PropertyInfo};
use super::scope::{modifier_keywords, scoped_to, within_type_scope};
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, Visit};

/// Collects the properties a named type and its extensions declare.
///
/// Every property gets exactly one access level (`internal` when none is
/// written) and is either `static` or `instance`.
#[derive(Debug, Clone)]
pub struct PropertyExtractor {
    type_name: String,
}

impl PropertyExtractor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl FactExtractor for PropertyExtractor {
    type Output = BTreeSet<PropertyInfo>;

    fn name(&self) -> &'static str {
        "properties"
    }

    fn extract(&self, tree: &SyntaxTree) -> BTreeSet<PropertyInfo> {
        let table = scoped_to(&self.type_name)
            .on_each(NodeKind::CODE_BLOCK_OWNERS, |_, _| Visit::Skip)
            .on(
                NodeKind::PropertyDeclaration,
                |node, properties: &mut BTreeSet<PropertyInfo>| {
                    if within_type_scope(node) {
                        properties.extend(property_infos(node));
                    }
                    // Accessor bodies declare locals only.
                    Visit::Skip
                },
            );

        let mut properties = BTreeSet::new();
        walk(tree, &table, &mut properties);
        properties
    }
}

fn property_infos(node: NodeRef<'_>) -> Vec<PropertyInfo> {
    let modifiers = property_modifiers(node);
    binding_names(node)
        .into_iter()
        .map(|name| PropertyInfo {
            name: name.to_string(),
            modifiers: modifiers.clone(),
        })
        .collect()
}

/// Names bound by a declaration; `let (a, b) = ...` binds two.
fn binding_names<'t>(node: NodeRef<'t>) -> Vec<&'t str> {
    let mut patterns: Vec<NodeRef<'t>> = node.children_by_field("name").collect();
    if patterns.is_empty() {
        patterns = node
            .children()
            .flat_map(|c| std::iter::once(c).chain(c.children()))
            .filter(|c| c.kind() == NodeKind::Pattern)
            .collect();
    }

    let mut names = Vec::new();
    for pattern in patterns {
        let before = names.len();
        names.extend(
            std::iter::once(pattern)
                .chain(pattern.descendants())
                .filter(|n| n.kind() == NodeKind::SimpleIdentifier)
                .map(|n| n.text()),
        );
        if names.len() == before {
            let text = pattern.text().trim();
            if !text.is_empty() {
                names.push(text);
            }
        }
    }
    names
}

fn property_modifiers(node: NodeRef<'_>) -> BTreeSet<Modifier> {
    let mut modifiers: BTreeSet<Modifier> = modifier_keywords(node)
        .into_iter()
        .flatten()
        .filter_map(Modifier::from_keyword)
        .filter(|m| *m != Modifier::Convenience)
        .collect();

    if !modifiers.iter().any(Modifier::is_access) {
        modifiers.insert(Modifier::Internal);
    }
    if !modifiers.contains(&Modifier::Static) {
        modifiers.insert(Modifier::Instance);
    }
    modifiers
}

#[cfg(all(test, feature = "tree-sitter"))]
mod tests {
    use super::*;
    use crate::analysis::parse_swift;

    fn properties(type_name: &str, source: &str) -> Vec<PropertyInfo> {
        PropertyExtractor::new(type_name)
            .extract(&parse_swift(source))
            .into_iter()
            .collect()
    }

    fn info(name: &str, modifiers: &[Modifier]) -> PropertyInfo {
        PropertyInfo {
            name: name.to_string(),
            modifiers: modifiers.iter().copied().collect(),
        }
    }

    #[test]
    fn test_default_modifiers() {
        let found = properties("Foo", "struct Foo {\n    var count: Int\n}\n");
        assert_eq!(
            found,
            vec![info("count", &[Modifier::Internal, Modifier::Instance])]
        );
    }

    #[test]
    fn test_access_setter_and_static_modifiers() {
        let source = r#"
class Foo {
    public private(set) var name: String = ""
    static let shared = Foo()
    fileprivate var secret = 0
}
"#;
        let found = properties("Foo", source);
        assert!(found.contains(&info(
            "name",
            &[Modifier::Public, Modifier::PrivateSet, Modifier::Instance]
        )));
        assert!(found.contains(&info("shared", &[Modifier::Internal, Modifier::Static])));
        assert!(found.contains(&info(
            "secret",
            &[Modifier::Fileprivate, Modifier::Instance]
        )));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_locals_are_not_properties() {
        let source = r#"
class Foo {
    var total: Int {
        let base = 1
        return base
    }
    init() {
        let local = 0
        _ = local
    }
    func run() {
        var counter = 0
        counter += 1
    }
}
"#;
        let found = properties("Foo", source);
        assert_eq!(
            found,
            vec![info("total", &[Modifier::Internal, Modifier::Instance])]
        );
    }

    #[test]
    fn test_other_types_and_globals_ignored() {
        let source = r#"
let global = 1
struct Bar { var bar = 0 }
struct Foo { let foo = 0 }
extension Foo { static var extra: Int { 0 } }
"#;
        let names: Vec<String> = properties("Foo", source).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["extra", "foo"]);
    }

    #[test]
    fn test_protocol_requirements_are_properties() {
        let source = r#"
protocol Foo {
    var name: String { get }
    static var shared: Foo { get set }
    init(name: String)
}
"#;
        let found = properties("Foo", source);
        assert_eq!(
            found,
            vec![
                info("name", &[Modifier::Internal, Modifier::Instance]),
                info("shared", &[Modifier::Internal, Modifier::Static]),
            ]
        );

        let inits = crate::analysis::InitializerExtractor::new("Foo").extract(&parse_swift(source));
        assert_eq!(inits.len(), 1);
    }

    #[test]
    fn test_initializer_modifiers_are_not_property_modifiers() {
        let found = properties("Foo", "class Foo {\n    convenience var x = 0\n}\n");
        assert_eq!(found, vec![info("x", &[Modifier::Internal, Modifier::Instance])]);
    }

    #[test]
    fn test_equal_properties_collapse() {
        let source = "struct Foo {\n    var a = 0\n}\nextension Foo {\n}\nstruct Foo {\n    var a = 1\n}\n";
        assert_eq!(properties("Foo", source).len(), 1);
    }
}
