use log::trace;
use rustc_hash::FxHashMap;

use super::trie::{Node, Trie};
use crate::error::{HuffError, Result};

/// Maps each byte held by a tree to its codeword (the root to leaf path, left = 0, right = 1).
#[derive(Debug, Default)]
pub struct CodeTable {
    codes: FxHashMap<u8, Vec<bool>>,
}

impl CodeTable {
    /// Walk the tree depth first and record the path to every leaf.
    pub fn from_trie(trie: &Trie) -> Self {
        let mut table = Self::default();
        let mut path = Vec::with_capacity(trie.depth());
        table.build(trie.root(), &mut path);
        trace!("Code table holds {} entries", table.codes.len());
        table
    }

    fn build(&mut self, node: &Node, path: &mut Vec<bool>) {
        match node {
            Node::Leaf(sym) => {
                self.codes.insert(*sym, path.clone());
            }
            Node::Internal(left, right) => {
                path.push(false);
                self.build(left, path);
                path.pop();

                path.push(true);
                self.build(right, path);
                path.pop();
            }
        }
    }

    /// Return the codeword for a byte.
    pub fn lookup(&self, sym: u8) -> Result<&[bool]> {
        self.codes
            .get(&sym)
            .map(Vec::as_slice)
            .ok_or(HuffError::UnknownSymbol(sym))
    }

    /// Iterate over (byte, codeword) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes.iter().map(|(&sym, code)| (sym, code.as_slice()))
    }
}
