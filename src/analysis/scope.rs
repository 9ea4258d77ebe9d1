//! Helpers for queries scoped to one named type.

use crate::syntax::{NodeKind, NodeRef};
use crate::walk::{Visit, VisitTable};

/// The declared name of a type, function or extension node.
pub(crate) fn declaration_name<'t>(node: NodeRef<'t>) -> Option<&'t str> {
    let name = node.child_by_field("name")?.text().trim();
    (!name.is_empty()).then_some(name)
}

/// A table that only descends into type scopes named `type_name`.
///
/// Extensions of the type count as its scope. Every other type scope is
/// pruned together with anything nested in it.
pub(crate) fn scoped_to<'h, A>(type_name: &'h str) -> VisitTable<'h, A> {
    VisitTable::new().on_each(NodeKind::TYPE_SCOPES, move |node, _| {
        if declaration_name(node) == Some(type_name) {
            Visit::Descend
        } else {
            Visit::Skip
        }
    })
}

/// Whether `node` sits inside a type declaration or extension.
pub(crate) fn within_type_scope(node: NodeRef<'_>) -> bool {
    node.ancestors().any(|a| a.kind().is_type_scope())
}

/// The modifier keywords attached directly to a declaration.
pub(crate) fn modifier_keywords<'t>(node: NodeRef<'t>) -> Option<impl Iterator<Item = &'t str>> {
    let list = node.first_child_of_kind(NodeKind::ModifierList)?;
    Some(
        list.children()
            .filter(|m| m.kind() == NodeKind::Modifier)
            .map(|m| m.text()),
    )
}
