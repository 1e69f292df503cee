//! Document-line expansion
//!
//! Line shape: `<document_id> <term_1> <term_2> ...`
//!
//! Expanded token list = every original term, in order, followed by the
//! templates of each term, in term order. The token list is what the
//! downstream bag-of-words builder consumes, so counts matter and
//! duplicate templates are kept.

mod writer;

pub use writer::{render_documents, write_document, write_documents};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{CodecError, TermCodec};

/// Unrecognized malformed-term policy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown malformed-term policy '{0}' (expected skip-term, skip-document or abort)")]
pub struct UnknownPolicy(pub String);

/// What a malformed term does to its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MalformedTermPolicy {
    /// Keep the raw term as a token, add no templates for it
    #[default]
    SkipTerm,
    /// Drop the whole document
    SkipDocument,
    /// Return the error to the caller
    Abort,
}

impl FromStr for MalformedTermPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip-term" => Ok(Self::SkipTerm),
            "skip-document" => Ok(Self::SkipDocument),
            "abort" => Ok(Self::Abort),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for MalformedTermPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SkipTerm => "skip-term",
            Self::SkipDocument => "skip-document",
            Self::Abort => "abort",
        })
    }
}

/// One parsed corpus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    /// Document identifier (first field)
    pub id: String,
    /// Encoded terms (remaining fields)
    pub terms: Vec<String>,
}

impl DocumentLine {
    /// Parse a whitespace-separated line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let id = fields.next()?.to_string();
        Some(Self {
            id,
            terms: fields.map(str::to_string).collect(),
        })
    }
}

/// Document with its template-augmented token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedDocument {
    /// Document identifier
    pub id: String,
    /// Original terms followed by generated templates
    pub tokens: Vec<String>,
    /// Terms kept verbatim because they failed to decode
    pub skipped_terms: usize,
}

impl fmt::Display for ExpandedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        for token in &self.tokens {
            write!(f, " {}", token)?;
        }
        Ok(())
    }
}

/// Expand a parsed document
///
/// Returns `Ok(None)` when the policy drops the document.
pub fn expand_document(
    codec: &TermCodec,
    document: &DocumentLine,
    policy: MalformedTermPolicy,
) -> Result<Option<ExpandedDocument>, CodecError> {
    let mut tokens = document.terms.clone();
    let mut skipped_terms = 0;

    for term in &document.terms {
        let tree = match codec.decode(term) {
            Ok(tree) => tree,
            Err(err) => match policy {
                MalformedTermPolicy::Abort => return Err(err),
                MalformedTermPolicy::SkipDocument => {
                    warn!(document = %document.id, term = %term, error = %err, "dropping document with malformed term");
                    return Ok(None);
                }
                MalformedTermPolicy::SkipTerm => {
                    warn!(document = %document.id, term = %term, error = %err, "keeping malformed term without templates");
                    skipped_terms += 1;
                    continue;
                }
            },
        };
        tokens.extend(codec.generalize(&tree).map(|template| template.term));
    }

    debug!(
        document = %document.id,
        terms = document.terms.len(),
        tokens = tokens.len(),
        skipped_terms,
        "expanded document"
    );

    Ok(Some(ExpandedDocument {
        id: document.id.clone(),
        tokens,
        skipped_terms,
    }))
}

/// Parse and expand one corpus line
///
/// Returns `Ok(None)` for blank lines and for documents dropped by the policy.
pub fn expand_line(
    codec: &TermCodec,
    line: &str,
    policy: MalformedTermPolicy,
) -> Result<Option<ExpandedDocument>, CodecError> {
    match DocumentLine::parse(line) {
        Some(document) => expand_document(codec, &document, policy),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GeneralizationDepth;

    fn codec() -> TermCodec {
        TermCodec::new(GeneralizationDepth::unbounded())
    }

    #[test]
    fn test_parse_line() {
        let line = DocumentLine::parse("doc7  alpha:0:beta\tgamma\n").unwrap();
        assert_eq!(line.id, "doc7");
        assert_eq!(line.terms, vec!["alpha:0:beta", "gamma"]);
        assert!(DocumentLine::parse("   \n").is_none());
        assert!(DocumentLine::parse("lonely").unwrap().terms.is_empty());
    }

    #[test]
    fn test_templates_follow_original_terms() {
        let doc = expand_line(&codec(), "d1 a:0:b c x:0:y", MalformedTermPolicy::Abort)
            .unwrap()
            .unwrap();
        assert_eq!(
            doc.tokens,
            vec!["a:0:b", "c", "x:0:y", "_:0:b", "a:0:_", "_:0:y", "x:0:_"]
        );
        assert_eq!(doc.to_string(), "d1 a:0:b c x:0:y _:0:b a:0:_ _:0:y x:0:_");
    }

    #[test]
    fn test_skip_term_keeps_raw_token() {
        let doc = expand_line(&codec(), "d2 a:1:b c:0:d", MalformedTermPolicy::SkipTerm)
            .unwrap()
            .unwrap();
        assert_eq!(doc.tokens, vec!["a:1:b", "c:0:d", "_:0:d", "c:0:_"]);
        assert_eq!(doc.skipped_terms, 1);
    }

    #[test]
    fn test_skip_document_and_abort() {
        let line = "d3 good:0:term bad:x:term";
        assert_eq!(
            expand_line(&codec(), line, MalformedTermPolicy::SkipDocument),
            Ok(None)
        );
        assert!(matches!(
            expand_line(&codec(), line, MalformedTermPolicy::Abort),
            Err(CodecError::Format(_))
        ));
    }

    #[test]
    fn test_policy_names() {
        for policy in [
            MalformedTermPolicy::SkipTerm,
            MalformedTermPolicy::SkipDocument,
            MalformedTermPolicy::Abort,
        ] {
            assert_eq!(policy.to_string().parse::<MalformedTermPolicy>(), Ok(policy));
        }
        assert_eq!(
            "ignore".parse::<MalformedTermPolicy>(),
            Err(UnknownPolicy("ignore".to_string()))
        );
    }
}
