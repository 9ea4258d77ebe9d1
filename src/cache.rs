//! Memoizing cache of parsed syntax trees.
//!
//! Each file identity is parsed at most once per cache lifetime. Failed
//! parses are not cached so a later request retries. The cache is not
//! internally synchronized: `get` takes `&mut self`, and callers sharing one
//! cache across threads must wrap it in their own lock.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::parser::{FileIdentity, ParseProvider};
use crate::syntax::SyntaxTree;

/// In-memory cache of parsed files keyed by identity.
pub struct TreeCache<P> {
    provider: P,
    trees: HashMap<FileIdentity, Arc<SyntaxTree>>,
}

impl<P: ParseProvider> TreeCache<P> {
    /// Create an empty cache that parses with `provider`.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            trees: HashMap::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get the tree for a file, reading and parsing it on first request.
    pub fn get(&mut self, identity: &FileIdentity) -> Result<Arc<SyntaxTree>, AnalysisError> {
        if let Some(tree) = self.lookup(identity) {
            return Ok(tree);
        }

        let source = fs::read(identity.path()).map_err(|e| AnalysisError::ParseFailure {
            identity: identity.clone(),
            source: e.into(),
        })?;
        self.store(identity, &source)
    }

    /// Get the tree for in-memory source registered under `identity`.
    ///
    /// Same memoization rules as [`TreeCache::get`]: if the identity is
    /// already cached, `source` is ignored and the stored tree returned.
    pub fn insert_source(
        &mut self,
        identity: &FileIdentity,
        source: &[u8],
    ) -> Result<Arc<SyntaxTree>, AnalysisError> {
        if let Some(tree) = self.lookup(identity) {
            return Ok(tree);
        }
        self.store(identity, source)
    }

    pub fn contains(&self, identity: &FileIdentity) -> bool {
        self.trees.contains_key(identity)
    }

    /// Number of cached trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    fn lookup(&self, identity: &FileIdentity) -> Option<Arc<SyntaxTree>> {
        let tree = self.trees.get(identity)?;
        log::debug!("tree cache hit: {}", identity);
        Some(Arc::clone(tree))
    }

    fn store(
        &mut self,
        identity: &FileIdentity,
        source: &[u8],
    ) -> Result<Arc<SyntaxTree>, AnalysisError> {
        log::debug!("tree cache miss: {}", identity);
        let tree = self
            .provider
            .parse(source, identity)
            .map_err(|source| AnalysisError::ParseFailure {
                identity: identity.clone(),
                source,
            })?;

        let tree = Arc::new(tree);
        self.trees.insert(identity.clone(), Arc::clone(&tree));
        Ok(tree)
    }
}
