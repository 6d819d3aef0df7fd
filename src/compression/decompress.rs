use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, trace};

use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::serializer::read_trie;
use crate::huffman_coding::trie::{Node, Trie};

/// Largest valid padding count.
const MAX_PADDING: u8 = 7;

/// What a decompression run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub payload_bits: u64,
    pub padding: u8,
}

/// Walks the tree one bit at a time, returning to the root after every leaf.
struct Decoder<'a> {
    root: &'a Node,
    cursor: &'a Node,
}

impl<'a> Decoder<'a> {
    fn new(trie: &'a Trie) -> Self {
        Self {
            root: trie.root(),
            cursor: trie.root(),
        }
    }

    /// Follow one bit. Returns the decoded byte when a leaf is reached.
    fn step(&mut self, bit: bool) -> Result<Option<u8>> {
        let next = self
            .cursor
            .child(bit)
            .ok_or_else(|| HuffError::corrupt("no child to follow in the tree"))?;
        match next {
            Node::Leaf(sym) => {
                self.cursor = self.root;
                Ok(Some(*sym))
            }
            Node::Internal(..) => {
                self.cursor = next;
                Ok(None)
            }
        }
    }

    fn at_root(&self) -> bool {
        std::ptr::eq(self.cursor, self.root)
    }
}

/// Decompress the file at `input` into a new file at `output`.
pub fn decompress_file(input: &Path, output: &Path) -> Result<DecompressStats> {
    info!("Decompressing {} into {}", input.display(), output.display());
    let fin = File::open(input).map_err(|e| HuffError::open(input, e))?;
    let f_out = File::create(output).map_err(|e| HuffError::open(output, e))?;
    decompress(BufReader::new(fin), BufWriter::new(f_out))
}

/// Decompress `input` into `output`. The payload is streamed; only the last few bits are held
/// back so the filler bits named by the padding count can be dropped.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<DecompressStats> {
    let mut br = BitReader::new(input);

    // 1. Rebuild the tree
    let trie = read_trie(&mut br)?;
    debug!(
        "Read a tree with {} leaves and depth {}",
        trie.leaf_count(),
        trie.depth()
    );

    // 2. Padding count
    let padding = br.read_byte()?;
    if br.is_eof() {
        return Err(HuffError::corrupt("missing padding count"));
    }
    if padding > MAX_PADDING {
        return Err(HuffError::corrupt(format!(
            "padding count {} is out of range",
            padding
        )));
    }
    trace!("Padding count is {}", padding);

    // 3. Decode the payload
    let mut bw = BitWriter::new(output);
    let mut decoder = Decoder::new(&trie);
    let mut held: VecDeque<bool> = VecDeque::with_capacity(MAX_PADDING as usize + 1);
    let mut payload_bits = 0_u64;
    loop {
        let bit = br.read_bit()?;
        if br.is_eof() {
            break;
        }
        held.push_back(bit);
        if held.len() > MAX_PADDING as usize {
            if let Some(bit) = held.pop_front() {
                payload_bits += 1;
                if let Some(sym) = decoder.step(bit)? {
                    bw.write_byte(sym)?;
                }
            }
        }
    }

    // The last `padding` bits are filler
    let keep = held
        .len()
        .checked_sub(padding as usize)
        .ok_or_else(|| HuffError::corrupt("payload is shorter than its padding"))?;
    for bit in held.drain(..keep) {
        payload_bits += 1;
        if let Some(sym) = decoder.step(bit)? {
            bw.write_byte(sym)?;
        }
    }
    if !decoder.at_root() {
        debug!("Discarding an incomplete codeword at the end of the payload");
    }
    let output_bytes = bw.finish()?;

    let stats = DecompressStats {
        input_bytes: br.bytes_read(),
        output_bytes,
        payload_bits,
        padding,
    };
    info!(
        "{} bytes in, {} bytes out, {} payload bits",
        stats.input_bytes, stats.output_bytes, stats.payload_bits
    );
    Ok(stats)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use proptest::prelude::*;

    use super::{decompress, decompress_file};
    use crate::compression::compress::{compress, compress_file};
    use crate::error::HuffError;

    fn compress_bytes(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        compress(&mut Cursor::new(data), &mut out).unwrap();
        out
    }

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let packed = compress_bytes(data);
        let mut out = Vec::new();
        decompress(packed.as_slice(), &mut out).unwrap();
        out
    }

    /// Bytes drawn mostly from a small alphabet, with occasional arbitrary values.
    fn skewed_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(prop_oneof![4 => 0_u8..4, 1 => any::<u8>()], 1..max_len)
    }

    #[test]
    fn single_symbol_test() {
        assert_eq!(round_trip(b"aaaa"), b"aaaa");
        assert_eq!(round_trip(b"a"), b"a");
        assert_eq!(round_trip(&[255; 9]), vec![255; 9]);
    }

    #[test]
    fn text_test() {
        let text = b"Peter Piper picked a peck of pickled peppers.\nA peck of pickled peppers Peter Piper picked.\n";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn skewed_test() {
        let mut data = vec![b'a'; 100];
        data.push(b'b');
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn all_bytes_test() {
        let data: Vec<u8> = (0..=255_u8).cycle().take(256 * 3 + 17).collect();
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn deep_tree_test() {
        // Fibonacci counts push the tree towards one codeword per level
        let mut data = Vec::new();
        let (mut a, mut b) = (1_usize, 1_usize);
        for sym in 0..20_u8 {
            data.extend(std::iter::repeat(sym).take(a));
            (a, b) = (b, a + b);
        }
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn large_input_test() {
        let data: Vec<u8> = (0..70_000_u32).map(|i| (i * 7 % 13) as u8).collect();
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn stats_test() {
        let data = b"stats for a short paragraph of text\n".repeat(14);
        let packed = compress_bytes(&data);
        let mut out = Vec::new();
        let stats = decompress(packed.as_slice(), &mut out).unwrap();
        assert_eq!(stats.input_bytes, packed.len() as u64);
        assert_eq!(stats.output_bytes, data.len() as u64);
    }

    #[test]
    fn truncated_tree_test() {
        let mut packed = Vec::new();
        let stats = compress(&mut Cursor::new(b"hello, huffman"), &mut packed).unwrap();
        // every cut that ends before the last tree bit
        for len in 0..(stats.tree_bits as usize + 7) / 8 {
            let result = decompress(&packed[..len], Vec::new());
            assert!(
                matches!(result, Err(HuffError::CorruptFormat(_))),
                "length {} was accepted",
                len
            );
        }
    }

    #[test]
    fn missing_padding_test() {
        // tree 0 1'a' 1'b' is 19 bits; cut inside the padding byte
        let packed = compress_bytes(b"aaaa");
        let result = decompress(&packed[..3], Vec::new());
        assert!(matches!(result, Err(HuffError::CorruptFormat(_))));
    }

    #[test]
    fn bad_padding_test() {
        // tree 0 1'a' 1'b', then padding byte 0xff
        let bytes = [0x58_u8, 0x6c, 0x5f, 0xe0];
        let result = decompress(bytes.as_slice(), Vec::new());
        assert!(matches!(result, Err(HuffError::CorruptFormat(_))));
    }

    #[test]
    fn incomplete_codeword_test() {
        // tree 0 1'a' 0 1'b' 1'c', padding 0, payload 0 1: 'a' then half of 'b'/'c'
        let mut packed = Vec::new();
        {
            use crate::bitstream::bitwriter::BitWriter;
            use crate::huffman_coding::serializer::write_trie;
            use crate::huffman_coding::trie::{Node, Trie};
            let trie = Trie::new(Node::internal(
                Node::Leaf(b'a'),
                Node::internal(Node::Leaf(b'b'), Node::Leaf(b'c')),
            ))
            .unwrap();
            let mut bw = BitWriter::new(&mut packed);
            let tree_bits = write_trie(&trie, &mut bw).unwrap();
            assert_eq!(tree_bits, 29);
            // 29 + 2 payload bits leaves 1 filler bit
            bw.write_byte(1).unwrap();
            bw.write_bits(&[false, true]).unwrap();
            bw.finish().unwrap();
        }
        let mut out = Vec::new();
        decompress(packed.as_slice(), &mut out).unwrap();
        assert_eq!(out, b"a");
    }

    #[test]
    fn file_round_trip_test() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let packed = dir.path().join("plain.huf");
        let restored = dir.path().join("restored.txt");
        let data: Vec<u8> = (0..4096_u32).map(|i| (i * i % 251) as u8).collect();
        std::fs::write(&plain, &data).unwrap();

        let zipped = compress_file(&plain, &packed).unwrap();
        assert_eq!(zipped.output_bytes, std::fs::metadata(&packed).unwrap().len());
        let unzipped = decompress_file(&packed, &restored).unwrap();
        assert_eq!(unzipped.output_bytes, data.len() as u64);
        assert_eq!(std::fs::read(&restored).unwrap(), data);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        #[test]
        fn any_bytes_round_trip_test(data in prop::collection::vec(any::<u8>(), 1..4_096)) {
            prop_assert_eq!(round_trip(&data), data);
        }

        #[test]
        fn skewed_round_trip_test(data in skewed_bytes(20_000)) {
            prop_assert_eq!(round_trip(&data), data);
        }

        #[test]
        fn truncated_anywhere_in_tree_test(
            data in prop::collection::vec(any::<u8>(), 1..512),
            cut in any::<prop::sample::Index>(),
        ) {
            let mut packed = Vec::new();
            let stats = compress(&mut Cursor::new(&data), &mut packed).unwrap();
            // a length whose last byte ends before the last tree bit
            let len = cut.index((stats.tree_bits as usize + 7) / 8);
            let result = decompress(&packed[..len], Vec::new());
            prop_assert!(matches!(result, Err(HuffError::CorruptFormat(_))));
        }

        #[test]
        fn arbitrary_bytes_test(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let mut out = Vec::new();
            if let Ok(stats) = decompress(data.as_slice(), &mut out) {
                prop_assert_eq!(stats.output_bytes, out.len() as u64);
            }
        }
    }
}
