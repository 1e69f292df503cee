//! Term codec facade
//!
//! Bundles decode / encode / template generation behind one value that
//! carries the generalization depth. Stateless across calls.

mod config;

pub use config::{ConfigurationError, GeneralizationDepth};

use thiserror::Error;

use crate::tree::{FormatError, TermTree, Templates};

/// Errors surfaced by the codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Encoded term is malformed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Depth bound could not be parsed
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Term-tree codec configured with a generalization depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCodec {
    depth: GeneralizationDepth,
}

impl TermCodec {
    /// Create a codec generalizing down to `depth`
    pub fn new(depth: GeneralizationDepth) -> Self {
        Self { depth }
    }

    /// Create a codec from a textual depth bound (`"3"`, `"unbounded"`, ...)
    pub fn from_depth_str(depth: &str) -> Result<Self, CodecError> {
        Ok(Self::new(depth.parse()?))
    }

    /// Configured depth bound
    pub fn depth(&self) -> GeneralizationDepth {
        self.depth
    }

    /// Reconstruct the tree of an encoded term
    pub fn decode(&self, term: &str) -> Result<TermTree, CodecError> {
        Ok(crate::tree::decode(term)?)
    }

    /// Canonical encoding of a tree
    pub fn encode(&self, tree: &TermTree) -> String {
        tree.to_term()
    }

    /// Lazy templates of `tree` under the configured bound
    pub fn generalize<'a>(&self, tree: &'a TermTree) -> Templates<'a> {
        tree.generalize(self.depth)
    }

    /// Decode `term` and collect its templates
    pub fn templates(&self, term: &str) -> Result<Vec<String>, CodecError> {
        let tree = self.decode(term)?;
        Ok(tree.templates(self.depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_codec() {
        let codec = TermCodec::new(GeneralizationDepth::limited(1));
        let templates = codec.templates("a:0:b:1:c:0:d").unwrap();
        assert_eq!(templates, vec!["_:1:c:0:d", "a:0:b:1:_"]);
    }

    #[test]
    fn test_round_trip_through_codec() {
        let codec = TermCodec::new(GeneralizationDepth::unbounded());
        let term = "gene:1:express:0:cell";
        let tree = codec.decode(term).unwrap();
        assert_eq!(codec.encode(&tree), term);
    }

    #[test]
    fn test_errors_are_typed() {
        let codec = TermCodec::new(GeneralizationDepth::unbounded());
        assert!(matches!(codec.decode("a:x:b"), Err(CodecError::Format(_))));
        assert!(matches!(
            TermCodec::from_depth_str("-2"),
            Err(CodecError::Configuration(ConfigurationError::Negative(_)))
        ));
        assert_eq!(
            TermCodec::from_depth_str("3").unwrap().depth(),
            GeneralizationDepth::limited(3)
        );
    }
}
