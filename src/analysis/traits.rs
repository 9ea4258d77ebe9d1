//! Core trait shared by the fact extractors.

use crate::cache::TreeCache;
use crate::error::AnalysisError;
use crate::parser::{FileIdentity, ParseProvider};
use crate::syntax::SyntaxTree;

/// One kind of fact that can be read off a parsed Swift file.
///
/// Implementations hold their query (type name, member name) and are pure
/// functions of the tree: extracting twice from the same tree yields equal
/// results.
pub trait FactExtractor {
    type Output;

    /// Short command-style name, e.g. `"imports"`.
    fn name(&self) -> &'static str;

    /// Extract facts from an already parsed tree.
    fn extract(&self, tree: &SyntaxTree) -> Self::Output;

    /// Fetch `identity` through `cache`, parsing it on first use, and
    /// extract from the resulting tree.
    fn run<P: ParseProvider>(
        &self,
        cache: &mut TreeCache<P>,
        identity: &FileIdentity,
    ) -> Result<Self::Output, AnalysisError> {
        let tree = cache.get(identity)?;
        let output = self.extract(&tree);
        log::debug!("{} extracted from {}", self.name(), identity);
        Ok(output)
    }
}
