//! The bitstream module forms the I/O subsystem for the huffman compressor.
//!
//! The compressed format is a bit sequence (a pre-order tree followed by variable length
//! codewords) that is stored in a byte-oriented file. BitWriter packs bits into bytes on the way
//! out, and BitReader unpacks them on the way in. Both work most significant bit first.
//!
pub mod bitreader;
pub mod bitwriter;
