//! The compression module manages both directions of the huffman file format.
//!
//! Compression happens in the following steps:
//! - Frequency count: read the whole input once and tally every byte value.
//! - Tree: build the huffman tree from the tally, and the codeword table from the tree.
//! - Encode: read the input a second time and collect the codeword of every byte.
//! - Write: the tree (pre-order, bit tagged), one padding count byte, then the codewords.
//!
//! The padding count says how many bits at the end of the last byte are filler. It is the only
//! way to recover the exact length of the bit sequence from a byte aligned file.
//!
//! Decompression follows the inverse of the compression process.
//! - Read the tree.
//! - Read the padding count.
//! - Walk the tree with every payload bit except the trailing filler, writing a byte at each leaf.
//!

pub mod compress;
pub mod decompress;
