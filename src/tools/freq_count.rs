use std::io::{ErrorKind, Read};

use crate::error::Result;
use crate::huffman_coding::trie::SYMBOLS;

const CHUNK_SIZE: usize = 16 * 1024;

/// Returns a frequency count of every byte value in the source, and the number of bytes read.
pub fn count_frequencies<R: Read>(mut source: R) -> Result<([u64; SYMBOLS], u64)> {
    let mut freqs = [0_u64; SYMBOLS];
    let mut total = 0_u64;
    let mut buf = vec![0_u8; CHUNK_SIZE];
    loop {
        let size = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(size) => size,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        buf[..size].iter().for_each(|&el| freqs[el as usize] += 1);
        total += size as u64;
    }
    Ok((freqs, total))
}
