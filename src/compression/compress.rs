use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::serializer::write_trie;
use crate::huffman_coding::trie::Trie;
use crate::tools::freq_count::count_frequencies;

const CHUNK_SIZE: usize = 16 * 1024;

/// What a compression run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// Distinct byte values found in the input.
    pub distinct_symbols: usize,
    pub tree_bits: u64,
    pub payload_bits: u64,
    /// Filler bits at the end of the last byte (0-7).
    pub padding: u8,
}

impl CompressStats {
    /// Output size as a fraction of the input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Number of filler bits needed to byte align the tree plus the payload. The padding byte
/// itself is 8 bits and does not change the alignment.
pub fn padding_for(tree_bits: u64, payload_bits: u64) -> u8 {
    let modulus = ((tree_bits + payload_bits) % 8) as u8;
    if modulus == 0 {
        0
    } else {
        8 - modulus
    }
}

/// Compress the file at `input` into a new file at `output`.
pub fn compress_file(input: &Path, output: &Path) -> Result<CompressStats> {
    info!("Compressing {} into {}", input.display(), output.display());
    let fin = File::open(input).map_err(|e| HuffError::open(input, e))?;
    let mut fin = BufReader::new(fin);
    let f_out = File::create(output).map_err(|e| HuffError::open(output, e))?;
    compress(&mut fin, BufWriter::new(f_out))
}

/// Compress everything in `input` into `output`. The input is read twice: once to count byte
/// frequencies and once to encode, so it must be seekable.
pub fn compress<R: Read + Seek, W: Write>(input: &mut R, output: W) -> Result<CompressStats> {
    // 1. Count frequencies
    input.seek(SeekFrom::Start(0))?;
    let (freqs, input_bytes) = count_frequencies(&mut *input)?;
    if input_bytes == 0 {
        return Err(HuffError::EmptyInput);
    }

    // 2. Build the tree and the code table
    let trie = Trie::from_frequencies(&freqs)?;
    let table = CodeTable::from_trie(&trie);
    debug!(
        "Tree has {} leaves and depth {}",
        trie.leaf_count(),
        trie.depth()
    );

    // 3. Encode the input into memory
    input.seek(SeekFrom::Start(0))?;
    let payload = encode(input, &table)?;

    // 4. Write tree, padding count and payload
    let mut bw = BitWriter::new(output);
    let tree_bits = write_trie(&trie, &mut bw)?;
    let padding = padding_for(tree_bits, payload.len() as u64);
    bw.write_byte(padding)?;
    bw.write_bits(&payload)?;
    let output_bytes = bw.finish()?;

    let stats = CompressStats {
        input_bytes,
        output_bytes,
        distinct_symbols: freqs.iter().filter(|&&f| f != 0).count(),
        tree_bits,
        payload_bits: payload.len() as u64,
        padding,
    };
    info!(
        "{} bytes in, {} bytes out ({:.3}), {} distinct bytes, {} padding bits",
        stats.input_bytes,
        stats.output_bytes,
        stats.ratio(),
        stats.distinct_symbols,
        stats.padding
    );
    Ok(stats)
}

/// Append the codeword of every input byte, in order.
fn encode<R: Read>(input: &mut R, table: &CodeTable) -> Result<Vec<bool>> {
    let mut bits = Vec::new();
    let mut buf = vec![0_u8; CHUNK_SIZE];
    loop {
        let size = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..size] {
            bits.extend_from_slice(table.lookup(byte)?);
        }
    }
    Ok(bits)
}
