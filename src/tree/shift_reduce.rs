//! Shift-reduce reconstruction of a term tree
//!
//! Work queue (front = next) + stack of slots.
//! A slot may carry one pending height: a marker that was read but has
//! not yet been paired with a right-hand subtree.
//!
//! Merge rule: top slot pending `p`, incoming tree height `h` (leaf = -1)
//!   p == h + 1  =>  Internal(p, top, incoming) goes back to the queue front
//!   otherwise   =>  incoming becomes a new slot
//!
//! Requeueing the merged node lets one arrival trigger a chain of merges
//! against the stack before any further input is consumed.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::TermTree;

/// Errors raised while decoding an encoded term
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A leaf segment between markers (or at either end) is empty
    #[error("empty leaf at segment {index}")]
    EmptyLeaf {
        /// 0-based position of the leaf among the leaves
        index: usize,
    },

    /// Marker text is not a canonical non-negative height
    #[error("invalid height marker ':{segment}:'")]
    InvalidHeight {
        /// Text found between the colons
        segment: String,
    },

    /// Reconstruction finished with more than one unmerged subtree
    #[error("term does not reduce to a single tree ({remaining} subtrees left)")]
    UnresolvedStack {
        /// Number of slots left on the stack
        remaining: usize,
    },

    /// A height marker arrived with no subtree to attach to
    #[error("height marker {height} has no subtree to attach to")]
    OrphanHeight {
        /// The unattached height
        height: u32,
    },
}

/// Height markers: `:<digits>:`
fn marker_pattern() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r":([0-9]+):").expect("marker pattern is valid"))
}

/// Marker-shaped runs that are not heights: `:<text>:` with no colon inside
fn stray_marker_pattern() -> &'static Regex {
    static STRAY: OnceLock<Regex> = OnceLock::new();
    STRAY.get_or_init(|| Regex::new(r":([^:]*):").expect("stray marker pattern is valid"))
}

/// Queue element: a subtree waiting to be shifted, or a height marker
#[derive(Debug)]
enum Item {
    Tree(TermTree),
    Height(u32),
}

/// Stack element: subtree plus the height it is waiting to pair with
#[derive(Debug)]
struct StackSlot {
    tree: TermTree,
    pending: Option<u32>,
}

impl StackSlot {
    fn new(tree: TermTree) -> Self {
        Self {
            tree,
            pending: None,
        }
    }
}

/// Canonical height: no leading zero unless "0", fits u32
fn parse_height(segment: &str) -> Result<u32, FormatError> {
    let canonical = segment == "0" || !segment.starts_with('0');

    canonical
        .then(|| segment.parse::<u32>().ok())
        .flatten()
        .ok_or_else(|| FormatError::InvalidHeight {
            segment: segment.to_string(),
        })
}

/// Split an encoded term into its alternating leaf/height queue
fn tokenize(term: &str) -> Result<VecDeque<Item>, FormatError> {
    let mut queue = VecDeque::new();
    let mut leaf_start = 0;
    let mut leaf_index = 0;

    let mut push_leaf = |queue: &mut VecDeque<Item>, leaf: &str| {
        if leaf.is_empty() {
            return Err(FormatError::EmptyLeaf { index: leaf_index });
        }
        if let Some(stray) = stray_marker_pattern().captures(leaf).and_then(|caps| caps.get(1)) {
            return Err(FormatError::InvalidHeight {
                segment: stray.as_str().to_string(),
            });
        }
        leaf_index += 1;
        queue.push_back(Item::Tree(TermTree::leaf(leaf)));
        Ok(())
    };

    for caps in marker_pattern().captures_iter(term) {
        let (Some(marker), Some(text)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_leaf(&mut queue, &term[leaf_start..marker.start()])?;
        queue.push_back(Item::Height(parse_height(text.as_str())?));
        leaf_start = marker.end();
    }
    push_leaf(&mut queue, &term[leaf_start..])?;

    Ok(queue)
}

/// Decode an encoded term into its tree
///
/// A term without markers decodes to a single leaf equal to the input.
/// Leaves may hold single colons (`http:x`) but no `:<text>:` run: digits
/// there are read as structure, anything else is an `InvalidHeight`.
pub fn decode(term: &str) -> Result<TermTree, FormatError> {
    let mut queue = tokenize(term)?;
    let mut stack: Vec<StackSlot> = Vec::new();

    while let Some(item) = queue.pop_front() {
        match item {
            Item::Height(height) => match stack.last_mut() {
                Some(top) => top.pending = Some(height),
                None => return Err(FormatError::OrphanHeight { height }),
            },
            Item::Tree(tree) => {
                let merge_height = stack
                    .last()
                    .and_then(|top| top.pending)
                    .filter(|&pending| tree.fits_under(pending));

                if let Some(height) = merge_height {
                    if let Some(top) = stack.pop() {
                        queue.push_front(Item::Tree(TermTree::internal(height, top.tree, tree)));
                        continue;
                    }
                }
                stack.push(StackSlot::new(tree));
            }
        }
    }

    match stack.len() {
        1 => stack
            .pop()
            .map(|slot| slot.tree)
            .ok_or(FormatError::UnresolvedStack { remaining: 0 }),
        remaining => Err(FormatError::UnresolvedStack { remaining }),
    }
}
