//! The tools module provides helper functions for the huffman compressor.
//!
//! The tools are:
//! - cli: Command line interface and the interactive mode prompt.
//! - freq_count: Byte frequency count for the first compression pass.
//!
pub mod cli;
pub mod freq_count;
