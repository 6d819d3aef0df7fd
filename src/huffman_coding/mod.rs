//! The huffman module builds the coding tree and the codeword table, and stores the tree
//! alongside the compressed data.
//!
//! The tree is built once per file from the byte frequencies of the whole input. Frequent
//! bytes sit near the root and get short codewords, rare bytes sit deep and get long ones.
//! Since every byte lives in a leaf, no codeword is a prefix of another.
//!
//! - trie: the tree type and the greedy builder.
//! - code_table: byte to codeword lookup derived from a tree.
//! - serializer: writes and reads the tree as a pre-order bit sequence.
//!

pub mod code_table;
pub mod serializer;
pub mod trie;
