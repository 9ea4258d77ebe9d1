//! swiftfacts - structural fact extraction for Swift sources.
//!
//! Parses Swift files with tree-sitter and answers narrow structural
//! questions about each one: what it imports, which types inherit from a
//! given type, whether `Type.member` is accessed, and which initializers,
//! properties and type declarations it contains.
//!
//! # Architecture
//!
//! - `parser`: `ParseProvider` trait and the tree-sitter-swift provider
//! - `syntax`: immutable arena tree with parent links
//! - `cache`: parse-once `TreeCache` keyed by file identity
//! - `walk`: pre-order traversal driven by a per-kind `VisitTable`
//! - `analysis`: the fact extractors and their result types
//! - `config`, `report`, `cli`: the `swiftfacts` command-line surface
//!
//! # Example
//!
//! ```no_run
//! use swiftfacts::{FactExtractor, FileIdentity, ImportExtractor, SwiftParser, TreeCache};
//!
//! let mut cache = TreeCache::new(SwiftParser::new());
//! let imports = ImportExtractor::new().run(&mut cache, &FileIdentity::new("App.swift"))?;
//! println!("{} imports", imports.len());
//! # Ok::<(), swiftfacts::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cache;
#[cfg(feature = "tree-sitter")]
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod syntax;
pub mod walk;

pub use analysis::{
    ConformanceExtractor, FactExtractor, ImportExtractor, ImportStatement, InitializerExtractor,
    InitializerStatement, Modifier, Parameter, PropertyExtractor, PropertyInfo, QueriedMember,
    StaticUsage, StaticUsageExtractor, TypeConformance, TypeDeclarationExtractor, TypeInfo,
    TypeKind,
};
pub use cache::TreeCache;
pub use error::{AnalysisError, ParseError};
pub use parser::{FileIdentity, ParseOptions, ParseProvider};
#[cfg(feature = "tree-sitter")]
pub use parser::SwiftParser;
pub use syntax::{NodeKind, NodeRef, SyntaxTree};
pub use walk::{walk, walk_from, Visit, VisitTable};
