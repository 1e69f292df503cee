//! Generalized templates
//!
//! For every internal node within the depth bound, two templates:
//!   `_:h:<right>`  (left child replaced by the wildcard)
//!   `<left>:h:_`   (right child replaced by the wildcard)
//!
//! Order is pre-order DFS: the node's pair, then the left subtree's
//! templates, then the right subtree's. Duplicates are kept.

use std::fmt;

use super::TermTree;
use crate::codec::GeneralizationDepth;

/// Token standing in for a generalized-away child
pub const WILDCARD: &str = "_";

/// One generated template and the depth of the node it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    /// Depth of the generalized node (root = 0)
    pub depth: usize,
    /// Encoded template string
    pub term: String,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.term)
    }
}

/// Lazy template sequence over a borrowed tree
///
/// Restartable: call [`TermTree::generalize`] again for a fresh pass.
#[derive(Debug, Clone)]
pub struct Templates<'a> {
    bound: GeneralizationDepth,
    /// Nodes still to visit, with their depth
    stack: Vec<(&'a TermTree, usize)>,
    /// Right-wildcard template of the node just visited
    queued: Option<Template>,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(root: &'a TermTree, bound: GeneralizationDepth) -> Self {
        Self {
            bound,
            stack: vec![(root, 0)],
            queued: None,
        }
    }
}

impl Iterator for Templates<'_> {
    type Item = Template;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(template) = self.queued.take() {
            return Some(template);
        }

        while let Some((node, depth)) = self.stack.pop() {
            let TermTree::Internal {
                height,
                left,
                right,
            } = node
            else {
                continue;
            };
            if !self.bound.allows(depth) {
                continue;
            }

            self.stack.push((right.as_ref(), depth + 1));
            self.stack.push((left.as_ref(), depth + 1));

            self.queued = Some(Template {
                depth,
                term: format!("{}:{}:{}", left, height, WILDCARD),
            });
            return Some(Template {
                depth,
                term: format!("{}:{}:{}", WILDCARD, height, right),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str) -> TermTree {
        TermTree::leaf(token)
    }

    fn nested() -> TermTree {
        // (a:0:b):1:(c:0:d)
        TermTree::internal(
            1,
            TermTree::internal(0, leaf("a"), leaf("b")),
            TermTree::internal(0, leaf("c"), leaf("d")),
        )
    }

    #[test]
    fn test_single_node_templates() {
        let tree = TermTree::internal(1, leaf("noun"), leaf("verb"));
        assert_eq!(
            tree.templates(GeneralizationDepth::unbounded()),
            vec!["_:1:verb", "noun:1:_"]
        );
    }

    #[test]
    fn test_leaf_has_no_templates() {
        assert!(leaf("solo")
            .templates(GeneralizationDepth::unbounded())
            .is_empty());
    }

    #[test]
    fn test_preorder_left_before_right() {
        let templates = nested().templates(GeneralizationDepth::unbounded());
        assert_eq!(
            templates,
            vec![
                "_:1:c:0:d",
                "a:0:b:1:_",
                "_:0:b",
                "a:0:_",
                "_:0:d",
                "c:0:_",
            ]
        );
    }

    #[test]
    fn test_depth_bound_stops_recursion() {
        let tree = nested();
        assert!(tree.templates(GeneralizationDepth::limited(0)).is_empty());
        assert_eq!(
            tree.templates(GeneralizationDepth::limited(1)),
            vec!["_:1:c:0:d", "a:0:b:1:_"]
        );
        assert_eq!(
            tree.templates(GeneralizationDepth::limited(2)),
            tree.templates(GeneralizationDepth::unbounded())
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let tree = TermTree::internal(
            1,
            TermTree::internal(0, leaf("x"), leaf("y")),
            TermTree::internal(0, leaf("x"), leaf("y")),
        );
        let templates = tree.templates(GeneralizationDepth::unbounded());
        assert_eq!(templates.len(), 6);
        assert_eq!(templates.iter().filter(|t| *t == "_:0:y").count(), 2);
    }

    #[test]
    fn test_depths_reported() {
        let depths: Vec<usize> = nested()
            .generalize(GeneralizationDepth::unbounded())
            .map(|template| template.depth)
            .collect();
        assert_eq!(depths, vec![0, 0, 1, 1, 1, 1]);
    }
}
