//! Swift parse provider built on tree-sitter-swift.
//!
//! The concrete tree-sitter tree is lowered into the crate's arena
//! [`SyntaxTree`] in a single cursor pass; only the node kinds the analyzers
//! dispatch on get a dedicated [`NodeKind`].

use tree_sitter::{Language, Parser as TsParser, TreeCursor};

use super::{FileIdentity, ParseOptions, ParseProvider};
use crate::error::ParseError;
use crate::syntax::{NodeKind, Span, SyntaxTree, TreeBuilder};

/// Keywords that select the flavour of a `class_declaration` node; the
/// grammar uses one node kind for classes, structs, enums, actors and
/// extensions.
const DECLARATION_KEYWORDS: &[&str] = &["class", "struct", "enum", "extension", "actor"];

/// Longest excerpt of unexpected source quoted in a syntax error.
const MAX_EXCERPT: usize = 40;

/// Tree-sitter backed Swift parser.
pub struct SwiftParser {
    language: Language,
    options: ParseOptions,
}

impl SwiftParser {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            language: tree_sitter_swift::LANGUAGE.into(),
            options,
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    fn create_parser(&self) -> Result<TsParser, ParseError> {
        let mut parser = TsParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(parser)
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseProvider for SwiftParser {
    fn parse(&self, source: &[u8], identity: &FileIdentity) -> Result<SyntaxTree, ParseError> {
        let mut parser = self.create_parser()?;
        let ts_tree = parser.parse(source, None).ok_or(ParseError::Cancelled)?;

        let mut builder = TreeBuilder::new(identity.clone(), source.to_vec());
        lower(&mut ts_tree.walk(), &mut builder);
        let tree = builder.finish();

        log::debug!(
            "parsed {} ({} nodes{})",
            identity,
            tree.len(),
            if tree.has_errors() { ", recovered from errors" } else { "" }
        );

        if self.options.strict {
            if let Some(node) = tree.first_error() {
                let span = node.span();
                return Err(ParseError::Syntax {
                    line: span.start_line,
                    column: span.start_col,
                    message: describe_error(node.grammar_kind(), node.text()),
                });
            }
        }

        Ok(tree)
    }

    fn language(&self) -> &str {
        "swift"
    }
}

/// Copy every node under the cursor into the builder, preserving order,
/// field names and parent links.
fn lower(cursor: &mut TreeCursor, builder: &mut TreeBuilder) {
    loop {
        let node = cursor.node();
        builder.start_node(
            classify(node),
            node.kind(),
            cursor.field_name(),
            Span::from_node(node),
        );

        if cursor.goto_first_child() {
            continue;
        }
        builder.finish_node();

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
            builder.finish_node();
        }
    }
}

fn classify(node: tree_sitter::Node) -> NodeKind {
    if node.is_error() || node.is_missing() {
        return NodeKind::Error;
    }
    if !node.is_named() {
        return NodeKind::Token;
    }

    match node.kind() {
        "source_file" => NodeKind::SourceFile,
        "class_declaration" => match declaration_keyword(node) {
            Some("struct") => NodeKind::StructDeclaration,
            Some("enum") => NodeKind::EnumDeclaration,
            Some("extension") => NodeKind::ExtensionDeclaration,
            Some("actor") => NodeKind::ActorDeclaration,
            _ => NodeKind::ClassDeclaration,
        },
        "protocol_declaration" => NodeKind::ProtocolDeclaration,
        "import_declaration" => NodeKind::ImportDeclaration,
        "init_declaration" => NodeKind::InitializerDeclaration,
        "deinit_declaration" => NodeKind::DeinitializerDeclaration,
        "function_declaration" | "protocol_function_declaration" => NodeKind::FunctionDeclaration,
        "subscript_declaration" => NodeKind::SubscriptDeclaration,
        "property_declaration" | "protocol_property_declaration" => NodeKind::PropertyDeclaration,
        "parameter" => NodeKind::Parameter,
        "inheritance_specifier" => NodeKind::InheritanceEntry,
        "navigation_expression" => NodeKind::MemberAccessExpression,
        "navigation_suffix" => NodeKind::NavigationSuffix,
        "modifiers" => NodeKind::ModifierList,
        "visibility_modifier"
        | "member_modifier"
        | "property_modifier"
        | "function_modifier"
        | "mutation_modifier"
        | "inheritance_modifier"
        | "ownership_modifier"
        | "parameter_modifier"
        | "property_behavior_modifier" => NodeKind::Modifier,
        "attribute" => NodeKind::Attribute,
        "comment" | "multiline_comment" => NodeKind::Comment,
        "type_identifier" => NodeKind::TypeIdentifier,
        "simple_identifier" => NodeKind::SimpleIdentifier,
        "identifier" => NodeKind::QualifiedIdentifier,
        "user_type" => NodeKind::UserType,
        "pattern" => NodeKind::Pattern,
        "lambda_literal" => NodeKind::Closure,
        _ => NodeKind::Other,
    }
}

/// The keyword token that decides what a `class_declaration` declares.
fn declaration_keyword(node: tree_sitter::Node) -> Option<&'static str> {
    if let Some(kind) = node.child_by_field_name("declaration_kind") {
        return Some(kind.kind());
    }
    let mut cursor = node.walk();
    let keyword = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| c.kind())
        .find(|k| DECLARATION_KEYWORDS.contains(k));
    keyword
}

fn describe_error(grammar_kind: &str, text: &str) -> String {
    if text.is_empty() {
        return format!("missing `{}`", grammar_kind);
    }
    let excerpt: String = text.chars().take(MAX_EXCERPT).collect();
    let excerpt = excerpt.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("unexpected `{}`", excerpt)
}
