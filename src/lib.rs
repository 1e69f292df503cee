//! # Term-tree codec for syntactic retrieval
//!
//! Syntactic relations extracted from parsed text arrive as *encoded terms*:
//! leaf tokens separated by `:<height>:` markers, e.g. `gene:1:express:0:cell`.
//! This crate reconstructs the binary tree behind such a term, re-encodes it,
//! and derives *generalized templates* (one child swapped for `_`) that are
//! added to a document's token list before topic modeling.
//!
//! ## Core Algorithm
//!
//! 1. **Split**: leaves and heights alternate around the markers
//! 2. **Shift-reduce**: a height waits on the top of the stack; a subtree
//!    whose height is exactly one less joins it, and the merged node is
//!    requeued so merges can cascade
//! 3. **Generalize**: pre-order walk emitting `_:h:R` and `L:h:_` per node,
//!    down to a configurable depth
//!
//! ## Usage Example
//!
//! ```
//! use syntrec::{GeneralizationDepth, TermCodec, TermTree};
//!
//! let codec = TermCodec::new(GeneralizationDepth::limited(3));
//! let tree = codec.decode("gene:1:express:0:cell")?;
//! assert_eq!(
//!     tree,
//!     TermTree::internal(
//!         1,
//!         TermTree::leaf("gene"),
//!         TermTree::internal(0, TermTree::leaf("express"), TermTree::leaf("cell")),
//!     )
//! );
//! assert_eq!(codec.encode(&tree), "gene:1:express:0:cell");
//! assert_eq!(
//!     codec.templates("gene:1:express:0:cell")?,
//!     vec!["_:1:express:0:cell", "gene:1:_", "_:0:cell", "express:0:_"]
//! );
//! # Ok::<(), syntrec::CodecError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod tree;   // Term trees: decode, encode, templates
pub mod codec;  // Codec facade and depth configuration
pub mod corpus; // Document-line expansion

// Re-exports for convenience
pub use tree::{decode, FormatError, Template, TermTree, Templates, WILDCARD};
pub use codec::{CodecError, ConfigurationError, GeneralizationDepth, TermCodec};
pub use corpus::{
    expand_document, expand_line, DocumentLine, ExpandedDocument, MalformedTermPolicy, UnknownPolicy,
};
