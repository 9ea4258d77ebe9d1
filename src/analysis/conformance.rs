//! Type conformance (inheritance) detection.

use super::facts::TypeConformance;
use super::scope::declaration_name;
use super::traits::FactExtractor;
use crate::syntax::{NodeKind, NodeRef, SyntaxTree};
use crate::walk::{walk, Visit, VisitTable};

/// Finds declarations whose inheritance clause names a given type.
#[derive(Debug, Clone)]
pub struct ConformanceExtractor {
    type_name: String,
}

#[derive(Default)]
struct Conformers {
    found: bool,
    names: Vec<String>,
}

impl ConformanceExtractor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl FactExtractor for ConformanceExtractor {
    type Output = TypeConformance;

    fn name(&self) -> &'static str {
        "conformance"
    }

    fn extract(&self, tree: &SyntaxTree) -> TypeConformance {
        let queried = self.type_name.as_str();
        let table = VisitTable::new().on(NodeKind::InheritanceEntry, |entry, acc: &mut Conformers| {
            if entry.text().trim() == queried {
                acc.found = true;
                if let Some(name) = conforming_type(entry) {
                    acc.names.push(name.to_string());
                }
            }
            Visit::Skip
        });

        let mut acc = Conformers::default();
        walk(tree, &table, &mut acc);
        TypeConformance {
            type_name: self.type_name.clone(),
            does_conform: acc.found,
            conforming_type_names: acc.names,
        }
    }
}

/// Name of the nearest class, struct or enum enclosing an inheritance entry.
///
/// Entries on protocols, actors and extensions have no conforming type.
fn conforming_type<'t>(entry: NodeRef<'t>) -> Option<&'t str> {
    let owner = entry.ancestors().find(|n| n.kind().is_nominal_type())?;
    declaration_name(owner)
}
