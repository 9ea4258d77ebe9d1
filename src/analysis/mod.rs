//! Fact extraction over parsed Swift sources.
//!
//! Each extractor answers one question about a single file by walking its
//! [`SyntaxTree`](crate::syntax::SyntaxTree) with a
//! [`VisitTable`](crate::walk::VisitTable):
//!
//! - `ImportExtractor`: every `import` declaration
//! - `ConformanceExtractor`: which types inherit from a named type
//! - `StaticUsageExtractor`: whether `Type.member` is accessed
//! - `InitializerExtractor`: initializer signatures of a named type
//! - `PropertyExtractor`: properties of a named type
//! - `TypeDeclarationExtractor`: every class, struct, protocol and enum
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ FileIdentity    │────▶│ TreeCache    │────▶│ SyntaxTree    │
//! └─────────────────┘     │ (parse once) │     │ (arena)       │
//!                         └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                         ┌──────────────┐     ┌───────────────┐
//!                         │ Facts        │◀────│ Extractor +   │
//!                         │ (serde)      │     │ VisitTable    │
//!                         └──────────────┘     └───────────────┘
//! ```

mod conformance;
mod facts;
mod imports;
mod initializers;
mod properties;
mod scope;
mod static_usage;
mod traits;
mod types;

pub use conformance::ConformanceExtractor;
pub use facts::{
    ImportStatement, InitializerStatement, Modifier, Parameter, PropertyInfo, QueriedMember,
    StaticUsage, TypeConformance, TypeInfo, TypeKind,
};
pub use imports::ImportExtractor;
pub use initializers::InitializerExtractor;
pub use properties::PropertyExtractor;
pub use static_usage::StaticUsageExtractor;
pub use traits::FactExtractor;
pub use types::TypeDeclarationExtractor;

#[cfg(all(test, feature = "tree-sitter"))]
pub(crate) fn parse_swift(source: &str) -> crate::syntax::SyntaxTree {
    use crate::parser::{FileIdentity, ParseProvider, SwiftParser};

    SwiftParser::new()
        .parse(source.as_bytes(), &FileIdentity::new("Test.swift"))
        .expect("swift source should parse")
}
