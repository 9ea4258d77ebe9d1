//! Parse provider interface.
//!
//! This module provides:
//! - `FileIdentity`: the stable key a source file is cached under
//! - `ParseProvider` trait: abstract source-to-tree conversion
//! - `SwiftParser`: the tree-sitter-swift implementation

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ParseError;
use crate::syntax::SyntaxTree;

#[cfg(feature = "tree-sitter")]
mod swift;

#[cfg(feature = "tree-sitter")]
pub use swift::SwiftParser;

/// Stable handle for a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileIdentity(PathBuf);

impl FileIdentity {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&Path> for FileIdentity {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileIdentity {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// Knobs shared by parse providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject trees that needed error recovery instead of analyzing them
    /// best-effort.
    pub strict: bool,
}

/// Converts raw source text into an immutable syntax tree.
pub trait ParseProvider {
    /// Parse `source`, recording `identity` on the resulting tree.
    ///
    /// Recoverable syntax errors still produce a tree (with `Error` nodes)
    /// unless the provider runs in strict mode.
    fn parse(&self, source: &[u8], identity: &FileIdentity) -> Result<SyntaxTree, ParseError>;

    /// Return the language this provider handles (e.g., "swift").
    fn language(&self) -> &str;
}

impl<P: ParseProvider + ?Sized> ParseProvider for &P {
    fn parse(&self, source: &[u8], identity: &FileIdentity) -> Result<SyntaxTree, ParseError> {
        (**self).parse(source, identity)
    }

    fn language(&self) -> &str {
        (**self).language()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display_and_ordering() {
        let a = FileIdentity::new("Sources/A.swift");
        let b = FileIdentity::from(Path::new("Sources/B.swift"));
        assert_eq!(a.to_string(), "Sources/A.swift");
        assert!(a < b);
        assert_eq!(a.path(), Path::new("Sources/A.swift"));
    }
}
