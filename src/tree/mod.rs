//! Term trees
//!
//! A term tree is a small binary tree recovered from an encoded term:
//!   Leaf     = opaque token
//!   Internal = (height, left, right)
//!
//! Encoding is in-order: `encode(left) ":" height ":" encode(right)`.
//! Heights are carried by the encoding, never computed from the shape.
//!
//! Terms can nest arbitrarily deep, so every walk here (encoding, counting,
//! outlining, dropping) uses an explicit stack rather than recursion.

mod shift_reduce;
mod templates;

pub use shift_reduce::{decode, FormatError};
pub use templates::{Template, Templates, WILDCARD};

use std::fmt;
use std::mem;

use crate::codec::GeneralizationDepth;

/// Binary term tree (owned, immutable once built)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermTree {
    /// Opaque token with no children
    Leaf(String),

    /// Node joining two subtrees under a height marker
    Internal {
        /// Height marker supplied by the encoding
        height: u32,
        /// Left subtree
        left: Box<TermTree>,
        /// Right subtree
        right: Box<TermTree>,
    },
}

impl TermTree {
    /// Create a leaf holding `token`
    pub fn leaf(token: impl Into<String>) -> Self {
        TermTree::Leaf(token.into())
    }

    /// Join two subtrees under `height`
    pub fn internal(height: u32, left: TermTree, right: TermTree) -> Self {
        TermTree::Internal {
            height,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Check if leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TermTree::Leaf(_))
    }

    /// Height marker of an internal node
    ///
    /// Leaves have no height (the -1 sentinel of the encoding scheme).
    #[inline]
    pub fn height(&self) -> Option<u32> {
        match self {
            TermTree::Leaf(_) => None,
            TermTree::Internal { height, .. } => Some(*height),
        }
    }

    /// Would this tree join, as a right child, a node with height `pending`?
    ///
    /// The reconstruction rule: `pending == height + 1`, where a leaf
    /// counts as -1 and therefore joins only under height 0.
    #[inline]
    pub fn fits_under(&self, pending: u32) -> bool {
        match self.height() {
            None => pending == 0,
            Some(height) => height.checked_add(1) == Some(pending),
        }
    }

    /// Leaf token, if this is a leaf
    pub fn token(&self) -> Option<&str> {
        match self {
            TermTree::Leaf(token) => Some(token),
            TermTree::Internal { .. } => None,
        }
    }

    /// Children of an internal node
    pub fn children(&self) -> Option<(&TermTree, &TermTree)> {
        match self {
            TermTree::Leaf(_) => None,
            TermTree::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Number of leaf tokens
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node.children() {
                None => count += 1,
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Structural depth: 0 for a leaf, 1 + deepest child otherwise
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some((left, right)) = node.children() {
                stack.push((right, level + 1));
                stack.push((left, level + 1));
            }
        }
        deepest
    }

    /// Canonical encoded form
    ///
    /// `decode(t.to_term()) == t` for every tree produced by [`decode`].
    pub fn to_term(&self) -> String {
        self.to_string()
    }

    /// Lazily generate wildcard templates down to `bound`
    pub fn generalize(&self, bound: GeneralizationDepth) -> Templates<'_> {
        Templates::new(self, bound)
    }

    /// Collect template strings down to `bound`, in generation order
    pub fn templates(&self, bound: GeneralizationDepth) -> Vec<String> {
        self.generalize(bound).map(|template| template.term).collect()
    }

    /// Indented multi-line view for inspection
    pub fn outline(&self) -> Outline<'_> {
        Outline { tree: self }
    }
}

/// Pending output of an in-order walk
enum Frame<'a> {
    Node(&'a TermTree),
    Height(u32),
}

impl fmt::Display for TermTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Frame::Node(self)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Height(height) => write!(f, ":{}:", height)?,
                Frame::Node(TermTree::Leaf(token)) => f.write_str(token)?,
                Frame::Node(TermTree::Internal {
                    height,
                    left,
                    right,
                }) => {
                    stack.push(Frame::Node(right.as_ref()));
                    stack.push(Frame::Height(*height));
                    stack.push(Frame::Node(left.as_ref()));
                }
            }
        }
        Ok(())
    }
}

impl Drop for TermTree {
    fn drop(&mut self) {
        let TermTree::Internal { left, right, .. } = self else {
            return;
        };
        if left.is_leaf() && right.is_leaf() {
            return;
        }

        // Detached nodes are dropped one at a time with leaf children only.
        let mut detached = vec![detach(left), detach(right)];
        while let Some(mut node) = detached.pop() {
            if let TermTree::Internal { left, right, .. } = &mut node {
                detached.push(detach(left));
                detached.push(detach(right));
            }
        }
    }
}

fn detach(slot: &mut TermTree) -> TermTree {
    mem::replace(slot, TermTree::Leaf(String::new()))
}

/// Indented rendering of a [`TermTree`], one node per line
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a> {
    tree: &'a TermTree,
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.tree, 0usize)];
        while let Some((node, indent)) = stack.pop() {
            let pad = indent * 2;
            match node {
                TermTree::Leaf(token) => writeln!(f, "{:pad$}{}", "", token, pad = pad)?,
                TermTree::Internal {
                    height,
                    left,
                    right,
                } => {
                    writeln!(f, "{:pad$}[{}]", "", height, pad = pad)?;
                    stack.push((right.as_ref(), indent + 1));
                    stack.push((left.as_ref(), indent + 1));
                }
            }
        }
        Ok(())
    }
}
