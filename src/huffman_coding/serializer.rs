//! Pre-order bit tagged tree format.
//!
//! A leaf is written as a 1 bit followed by its byte. An internal node is written as a 0 bit
//! followed by its left subtree and then its right subtree.

use std::io::{Read, Write};

use log::debug;

use super::trie::{Node, Trie};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};

/// Deepest tree 256 leaves can form.
const MAX_DEPTH: usize = 255;

/// Write the tree to the stream. Returns the number of bits written.
pub fn write_trie<W: Write>(trie: &Trie, bw: &mut BitWriter<W>) -> Result<u64> {
    let bits = write_node(trie.root(), bw)?;
    debug!("Wrote a {} bit tree", bits);
    Ok(bits)
}

fn write_node<W: Write>(node: &Node, bw: &mut BitWriter<W>) -> Result<u64> {
    match node {
        Node::Leaf(sym) => {
            bw.write_bit(true)?;
            bw.write_byte(*sym)?;
            Ok(9)
        }
        Node::Internal(left, right) => {
            bw.write_bit(false)?;
            Ok(1 + write_node(left, bw)? + write_node(right, bw)?)
        }
    }
}

/// Rebuild a tree from the stream. Running out of data part way through, nesting deeper than
/// any real tree, or a root that is a leaf are all reported as a corrupt format.
pub fn read_trie<R: Read>(br: &mut BitReader<R>) -> Result<Trie> {
    let root = read_node(br, 0)?;
    Trie::new(root)
}

fn read_node<R: Read>(br: &mut BitReader<R>, depth: usize) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(HuffError::corrupt(format!(
            "tree is deeper than {} levels",
            MAX_DEPTH
        )));
    }
    let is_leaf = br.read_bit()?;
    if br.is_eof() {
        return Err(HuffError::corrupt("unexpected end of file inside the tree"));
    }
    if is_leaf {
        let sym = br.read_byte()?;
        if br.is_eof() {
            return Err(HuffError::corrupt("unexpected end of file inside a leaf"));
        }
        return Ok(Node::Leaf(sym));
    }
    let left = read_node(br, depth + 1)?;
    let right = read_node(br, depth + 1)?;
    Ok(Node::internal(left, right))
}

#[cfg(test)]
mod test {
    use super::{read_trie, write_trie};
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::error::HuffError;
    use crate::huffman_coding::trie::{Node, Trie, SYMBOLS};

    fn to_bytes(trie: &Trie) -> (Vec<u8>, u64) {
        let mut out = Vec::new();
        let bits = {
            let mut bw = BitWriter::new(&mut out);
            let bits = write_trie(trie, &mut bw).unwrap();
            bw.finish().unwrap();
            bits
        };
        (out, bits)
    }

    #[test]
    fn layout_test() {
        // 0, 1 'a' (0x61), 1 'b' (0x62) => 0 1 01100001 1 01100010 + zero fill
        let trie = Trie::new(Node::internal(Node::Leaf(b'a'), Node::Leaf(b'b'))).unwrap();
        let (bytes, bits) = to_bytes(&trie);
        assert_eq!(bits, 19);
        assert_eq!(bytes, vec![0b0101_1000, 0b0110_1100, 0b0100_0000]);
    }

    #[test]
    fn round_trip_shape_test() {
        let trie = Trie::new(Node::internal(
            Node::internal(Node::Leaf(0), Node::Leaf(255)),
            Node::internal(
                Node::Leaf(b'q'),
                Node::internal(Node::Leaf(7), Node::Leaf(8)),
            ),
        ))
        .unwrap();
        let (bytes, _) = to_bytes(&trie);
        let read = read_trie(&mut BitReader::new(bytes.as_slice())).unwrap();
        assert_eq!(read, trie);
    }

    #[test]
    fn round_trip_full_test() {
        let freqs: [u64; SYMBOLS] = core::array::from_fn(|i| (i as u64 % 17) + 1);
        let trie = Trie::from_frequencies(&freqs).unwrap();
        let (bytes, bits) = to_bytes(&trie);
        // 255 internal nodes plus 256 tagged leaves
        assert_eq!(bits, 255 + 256 * 9);
        let read = read_trie(&mut BitReader::new(bytes.as_slice())).unwrap();
        assert_eq!(read, trie);
    }

    #[test]
    fn leaf_root_test() {
        // 1 then 'a' is a lone leaf
        let bytes = [0b1011_0000_u8, 0b1000_0000];
        let result = read_trie(&mut BitReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(HuffError::CorruptFormat(_))));
    }

    #[test]
    fn truncated_test() {
        let trie = Trie::new(Node::internal(
            Node::Leaf(b'a'),
            Node::internal(Node::Leaf(b'b'), Node::Leaf(b'c')),
        ))
        .unwrap();
        let (bytes, _) = to_bytes(&trie);
        for len in 0..bytes.len() {
            let result = read_trie(&mut BitReader::new(&bytes[..len]));
            assert!(
                matches!(result, Err(HuffError::CorruptFormat(_))),
                "length {} was accepted",
                len
            );
        }
    }

    #[test]
    fn endless_zeros_test() {
        let bytes = [0_u8; 64];
        let result = read_trie(&mut BitReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(HuffError::CorruptFormat(_))));
    }
}
