//! Closed set of node kinds the analyzers dispatch on.

use std::fmt;

/// Kind tag of a syntax node.
///
/// Grammar kinds the analyzers never look at collapse into `Other`
/// (named nodes) or `Token` (anonymous punctuation and keywords).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    SourceFile,
    ClassDeclaration,
    StructDeclaration,
    EnumDeclaration,
    ProtocolDeclaration,
    ActorDeclaration,
    ExtensionDeclaration,
    ImportDeclaration,
    InitializerDeclaration,
    DeinitializerDeclaration,
    FunctionDeclaration,
    SubscriptDeclaration,
    PropertyDeclaration,
    Parameter,
    InheritanceEntry,
    MemberAccessExpression,
    NavigationSuffix,
    ModifierList,
    Modifier,
    Attribute,
    Comment,
    TypeIdentifier,
    SimpleIdentifier,
    QualifiedIdentifier,
    UserType,
    Pattern,
    Closure,
    Error,
    Token,
    Other,
}

impl NodeKind {
    /// Every declaration that opens a named type scope.
    pub const TYPE_SCOPES: &'static [NodeKind] = &[
        NodeKind::ClassDeclaration,
        NodeKind::StructDeclaration,
        NodeKind::EnumDeclaration,
        NodeKind::ProtocolDeclaration,
        NodeKind::ActorDeclaration,
        NodeKind::ExtensionDeclaration,
    ];

    /// Declarations whose bodies hold statements rather than members.
    pub const CODE_BLOCK_OWNERS: &'static [NodeKind] = &[
        NodeKind::FunctionDeclaration,
        NodeKind::InitializerDeclaration,
        NodeKind::DeinitializerDeclaration,
        NodeKind::SubscriptDeclaration,
        NodeKind::Closure,
    ];

    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::ClassDeclaration => "class_declaration",
            NodeKind::StructDeclaration => "struct_declaration",
            NodeKind::EnumDeclaration => "enum_declaration",
            NodeKind::ProtocolDeclaration => "protocol_declaration",
            NodeKind::ActorDeclaration => "actor_declaration",
            NodeKind::ExtensionDeclaration => "extension_declaration",
            NodeKind::ImportDeclaration => "import_declaration",
            NodeKind::InitializerDeclaration => "initializer_declaration",
            NodeKind::DeinitializerDeclaration => "deinitializer_declaration",
            NodeKind::FunctionDeclaration => "function_declaration",
            NodeKind::SubscriptDeclaration => "subscript_declaration",
            NodeKind::PropertyDeclaration => "property_declaration",
            NodeKind::Parameter => "parameter",
            NodeKind::InheritanceEntry => "inheritance_entry",
            NodeKind::MemberAccessExpression => "member_access_expression",
            NodeKind::NavigationSuffix => "navigation_suffix",
            NodeKind::ModifierList => "modifier_list",
            NodeKind::Modifier => "modifier",
            NodeKind::Attribute => "attribute",
            NodeKind::Comment => "comment",
            NodeKind::TypeIdentifier => "type_identifier",
            NodeKind::SimpleIdentifier => "simple_identifier",
            NodeKind::QualifiedIdentifier => "qualified_identifier",
            NodeKind::UserType => "user_type",
            NodeKind::Pattern => "pattern",
            NodeKind::Closure => "closure",
            NodeKind::Error => "error",
            NodeKind::Token => "token",
            NodeKind::Other => "other",
        }
    }

    /// Class, struct or enum: the declarations that can own a conformance.
    pub fn is_nominal_type(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassDeclaration | NodeKind::StructDeclaration | NodeKind::EnumDeclaration
        )
    }

    /// Any declaration that opens a named type scope, including extensions.
    pub fn is_type_scope(&self) -> bool {
        Self::TYPE_SCOPES.contains(self)
    }

    /// Declarations whose bodies hold statements rather than members.
    pub fn is_code_block_owner(&self) -> bool {
        Self::CODE_BLOCK_OWNERS.contains(self)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
