//! Pre-order traversal
//!
//! Visit order: node, then children TL, TR, BL, BR, recursively.
//! This is the order both the structure bits and the leaf colors use.

use super::QuadNode;

/// Pre-order iterator over every node of a subtree.
///
/// Stack depth: O(3 · height) pending siblings.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a QuadNode>,
}

impl<'a> PreOrder<'a> {
    /// Start a traversal rooted at `root`.
    pub fn new(root: &'a QuadNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Reversed so that the top-left child is popped first
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

/// Pre-order iterator restricted to leaves.
#[derive(Debug)]
pub struct Leaves<'a> {
    inner: PreOrder<'a>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|node| node.is_leaf())
    }
}

/// Shape statistics of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeSummary {
    /// Total nodes (internal + leaves).
    pub nodes: usize,
    /// Leaf nodes.
    pub leaves: usize,
    /// Edges on the longest root-to-leaf path.
    pub depth: usize,
}

impl QuadNode {
    /// Iterate over all nodes in pre-order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    /// Iterate over leaves in pre-order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            inner: PreOrder::new(self),
        }
    }

    /// Summarize the tree's shape.
    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            nodes: count_nodes(self),
            leaves: count_leaves(self),
            depth: depth(self),
        }
    }
}

/// Number of leaves under (and including) `node`.
pub fn count_leaves(node: &QuadNode) -> usize {
    match node.children() {
        None => 1,
        Some(children) => children.iter().map(count_leaves).sum(),
    }
}

/// Number of nodes under (and including) `node`.
pub fn count_nodes(node: &QuadNode) -> usize {
    match node.children() {
        None => 1,
        Some(children) => 1 + children.iter().map(count_nodes).sum::<usize>(),
    }
}

/// Longest path from `node` to a leaf, in edges.
pub fn depth(node: &QuadNode) -> usize {
    match node.children() {
        None => 0,
        Some(children) => 1 + children.iter().map(depth).max().unwrap_or(0),
    }
}
