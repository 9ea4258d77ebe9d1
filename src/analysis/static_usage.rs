//! Static member usage detection (`Type.member`).

use super::facts::{QueriedMember, StaticUsage};
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, Visit, VisitTable};

/// Reports whether a file accesses `type_name.member_name` anywhere.
///
/// Only accesses whose base is the bare type name count; `x.Type.member`
/// or `Type().member` do not.
#[derive(Debug, Clone)]
pub struct StaticUsageExtractor {
    queried: QueriedMember,
}

impl StaticUsageExtractor {
    pub fn new(type_name: impl Into<String>, member_name: impl Into<String>) -> Self {
        Self {
            queried: QueriedMember {
                type_name: type_name.into(),
                member_name: member_name.into(),
            },
        }
    }

    pub fn queried_member(&self) -> &QueriedMember {
        &self.queried
    }
}

impl FactExtractor for StaticUsageExtractor {
    type Output = StaticUsage;

    fn name(&self) -> &'static str {
        "static-usage"
    }

    fn extract(&self, tree: &SyntaxTree) -> StaticUsage {
        let queried = &self.queried;
        let table = VisitTable::new().on(NodeKind::MemberAccessExpression, |node, used: &mut bool| {
            if base_name(node) == Some(queried.type_name.as_str())
                && member_name(node) == Some(queried.member_name.as_str())
            {
                *used = true;
            }
            // Chained accesses nest in the base expression.
            Visit::Descend
        });

        let mut used = false;
        walk(tree, &table, &mut used);
        StaticUsage {
            queried_member: self.queried.clone(),
            is_used: used,
        }
    }
}

/// The base of an access when it is a single bare identifier.
fn base_name<'t>(access: NodeRef<'t>) -> Option<&'t str> {
    let base = access
        .child_by_field("target")
        .or_else(|| access.children().next())?;
    match base.kind() {
        NodeKind::SimpleIdentifier => Some(base.text()),
        NodeKind::UserType => {
            let mut parts = base.children().filter(|c| c.kind() != NodeKind::Token);
            match (parts.next(), parts.next()) {
                (Some(only), None) if only.kind() == NodeKind::TypeIdentifier => Some(only.text()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// The member name after the dot.
fn member_name<'t>(access: NodeRef<'t>) -> Option<&'t str> {
    let suffix = access
        .child_by_field("suffix")
        .or_else(|| access.first_child_of_kind(NodeKind::NavigationSuffix))?;
    let member = suffix.child_by_field("suffix").or_else(|| {
        suffix
            .children()
            .filter(|c| c.kind() == NodeKind::SimpleIdentifier)
            .last()
    })?;
    Some(member.text())
}

#[cfg(all(test, feature = "tree-sitter"))]
mod tests {
    use super::*;
    use crate::analysis::parse_swift;

    fn is_used(type_name: &str, member: &str, source: &str) -> bool {
        StaticUsageExtractor::new(type_name, member)
            .extract(&parse_swift(source))
            .is_used
    }

    #[test]
    fn test_shared_instance_usage() {
        let source = "func route() {\n    let router = AirbnbRouter.shared\n}\n";
        assert!(is_used("AirbnbRouter", "shared", source));
    }

    #[test]
    fn test_bare_expression_statement() {
        assert!(is_used("AirbnbRouter", "shared", "AirbnbRouter.shared"));
        assert!(!is_used("Other", "shared", "AirbnbRouter.shared"));
    }

    #[test]
    fn test_whitespace_around_dot_is_ignored() {
        assert!(is_used("AirbnbRouter", "shared", "let r = AirbnbRouter\n    .shared\n"));
        assert!(is_used("AirbnbRouter", "shared", "let r = AirbnbRouter . shared\n"));
        assert!(!is_used("AirbnbRouter", "other", "let r = AirbnbRouter\n    .shared\n"));
    }

    #[test]
    fn test_other_member_is_not_usage() {
        let source = "let router = AirbnbRouter.default\n";
        assert!(!is_used("AirbnbRouter", "shared", source));
    }

    #[test]
    fn test_method_call_counts() {
        let source = "func f() {\n    Logger.log(\"hi\")\n}\n";
        assert!(is_used("Logger", "log", source));
    }

    #[test]
    fn test_chained_access_counts() {
        let source = "let value = Config.shared.value\n";
        assert!(is_used("Config", "shared", source));
        assert!(!is_used("Config", "value", source));
    }

    #[test]
    fn test_qualified_base_does_not_count() {
        let source = "let x = Module.Config.shared\n";
        assert!(!is_used("Config", "shared", source));
    }

    #[test]
    fn test_reports_queried_member() {
        let usage = StaticUsageExtractor::new("A", "b").extract(&parse_swift("let x = 1\n"));
        assert_eq!(usage.queried_member.type_name, "A");
        assert_eq!(usage.queried_member.member_name, "b");
        assert!(!usage.is_used);
    }
}
