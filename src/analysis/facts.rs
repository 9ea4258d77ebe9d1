//! Result value objects returned by the extractors.
//!
//! Field names serialize exactly as downstream tooling expects them
//! (`mainModule`, `doesConform`, `typeNames`, ...).

use std::collections::BTreeSet;
use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// One `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatement {
    /// Narrowing keyword (`struct`, `func`, ...), empty for plain imports.
    pub kind: String,
    pub main_module: String,
    /// Second path component, empty when only the module is imported.
    pub submodule: String,
}

/// Whether any declaration in a file inherits from a queried type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConformance {
    pub type_name: String,
    pub does_conform: bool,
    /// Conforming class/struct/enum names in source order, not deduplicated.
    pub conforming_type_names: Vec<String>,
}

/// A `(type, member)` pair a static usage query looks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueriedMember {
    pub type_name: String,
    pub member_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticUsage {
    pub queried_member: QueriedMember,
    pub is_used: bool,
}

/// One initializer parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    /// Primary type name first; compound and generic types add more.
    pub type_names: Vec<String>,
}

/// Signature of one initializer of a queried type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializerStatement {
    pub type_name: String,
    pub parameters: Vec<Parameter>,
    pub modifiers: BTreeSet<Modifier>,
}

impl InitializerStatement {
    pub fn is_convenience(&self) -> bool {
        self.modifiers.contains(&Modifier::Convenience)
    }
}

/// One stored or computed property of a queried type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    pub modifiers: BTreeSet<Modifier>,
}

/// Access, setter visibility, scope and initializer-kind attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Public,
    Private,
    Fileprivate,
    Internal,
    PrivateSet,
    InternalSet,
    PublicSet,
    Static,
    Instance,
    Convenience,
    Designated,
}

/// Source keywords (whitespace removed) and the modifier they denote.
///
/// `open` widens `public` and `class` members are type members; neither has
/// its own modifier. `fileprivate(set)` has no counterpart and is ignored.
static MODIFIER_KEYWORDS: phf::Map<&'static str, Modifier> = phf_map! {
    "public" => Modifier::Public,
    "open" => Modifier::Public,
    "private" => Modifier::Private,
    "fileprivate" => Modifier::Fileprivate,
    "internal" => Modifier::Internal,
    "private(set)" => Modifier::PrivateSet,
    "internal(set)" => Modifier::InternalSet,
    "public(set)" => Modifier::PublicSet,
    "static" => Modifier::Static,
    "class" => Modifier::Static,
    "convenience" => Modifier::Convenience,
};

impl Modifier {
    /// Access-level modifiers; a declaration without one is internal.
    pub const ACCESS: &'static [Modifier] = &[
        Modifier::Public,
        Modifier::Private,
        Modifier::Fileprivate,
        Modifier::Internal,
    ];

    /// Recognize a modifier as written in source, e.g. `private(set)`.
    pub fn from_keyword(text: &str) -> Option<Modifier> {
        let normalized: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        MODIFIER_KEYWORDS.get(normalized.as_str()).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Fileprivate => "fileprivate",
            Modifier::Internal => "internal",
            Modifier::PrivateSet => "privateSet",
            Modifier::InternalSet => "internalSet",
            Modifier::PublicSet => "publicSet",
            Modifier::Static => "static",
            Modifier::Instance => "instance",
            Modifier::Convenience => "convenience",
            Modifier::Designated => "designated",
        }
    }

    pub fn is_access(&self) -> bool {
        Self::ACCESS.contains(self)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a reported type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Protocol,
    Enum,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Protocol => "protocol",
            TypeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A class, struct, enum or protocol declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub kind: TypeKind,
    pub name: String,
    /// Leading comments joined with newlines; empty when there are none.
    pub comment: String,
}
