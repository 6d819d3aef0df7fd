use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::error::{HuffError, Result};

/// Number of distinct byte values, and so the size of a frequency table.
pub const SYMBOLS: usize = 256;

/// A node of the huffman tree. Internal nodes always own exactly two children.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Leaf(u8),
    Internal(Box<Node>, Box<Node>),
}

impl Node {
    pub fn internal(left: Node, right: Node) -> Node {
        Node::Internal(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Follow one bit down the tree: false goes left, true goes right. None from a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Internal(left, right) => Some(if bit { &**right } else { &**left }),
            Node::Leaf(_) => None,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A huffman tree whose root is never a leaf, so every byte it holds has a codeword of at
/// least one bit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Trie {
    root: Node,
}

impl Trie {
    /// Wrap a root node. Fails if the root is a leaf.
    pub fn new(root: Node) -> Result<Self> {
        if root.is_leaf() {
            return Err(HuffError::corrupt("the root of the tree is a leaf"));
        }
        Ok(Self { root })
    }

    /// Build the tree greedily from a table of byte counts: repeatedly join the two lightest
    /// subtrees until one remains. Ties go to the subtree queued first.
    pub fn from_frequencies(freqs: &[u64; SYMBOLS]) -> Result<Self> {
        let mut queue: BinaryHeap<Weighted> = freqs
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f != 0)
            .enumerate()
            .map(|(seq, (sym, &weight))| Weighted {
                weight,
                seq,
                node: Node::Leaf(sym as u8),
            })
            .collect();
        debug!("Building a tree over {} distinct bytes", queue.len());

        let mut seq = queue.len();
        let root = loop {
            let first = queue.pop().ok_or(HuffError::EmptyInput)?;
            let second = match queue.pop() {
                Some(node) => node,
                None => break first.node,
            };
            trace!(
                "Joining weights {} and {} (queue {})",
                first.weight,
                second.weight,
                queue.len()
            );
            queue.push(Weighted {
                weight: first.weight + second.weight,
                seq,
                node: Node::internal(first.node, second.node),
            });
            seq += 1;
        };

        // A single distinct byte still needs a one bit code, so give it a sibling.
        let root = match root {
            Node::Leaf(sym) => Node::internal(Node::Leaf(sym), Node::Leaf(sym.wrapping_add(1))),
            internal => internal,
        };
        Self::new(root)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root to leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

/// Queue entry used while building. Only lives during Trie::from_frequencies().
#[derive(Debug)]
struct Weighted {
    weight: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weighted {}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weighted {
    /// Reversed so the max-heap hands out the lightest (then oldest) entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
