//! Huffman coding file compressor.
//!
//! Builds a frequency weighted binary tree over the byte values of a file, derives a prefix-free
//! codeword for every byte, and stores the tree together with the encoded bitstream so the file
//! can be restored exactly.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffman test.txt test.huf` and answer `1` at the mode prompt.
//!
//! From code:
//!
//! ```no_run
//! use std::path::Path;
//! use huffman::{compress_file, decompress_file};
//!
//! compress_file(Path::new("test.txt"), Path::new("test.huf"))?;
//! decompress_file(Path::new("test.huf"), Path::new("test.out"))?;
//! # Ok::<(), huffman::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_file, CompressStats};
pub use compression::decompress::{decompress, decompress_file, DecompressStats};
pub use error::{HuffError, Result};
