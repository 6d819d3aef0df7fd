//! BitReader: bit-granularity input over any byte source.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. Bytes are
//! pulled one at a time, so wrap files in a BufReader.
//!

use std::io::{ErrorKind, Read};

use crate::error::Result;

/// Reads single bits (and whole bytes) from a byte-oriented source.
#[derive(Debug)]
pub struct BitReader<R> {
    source: R,
    /// Byte currently being consumed.
    buffer: u8,
    /// Bits of the buffer already handed out (8 means empty).
    count: u8,
    /// Set once a refill found no more data.
    eof: bool,
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: 0,
            count: 8,
            eof: false,
            bytes_read: 0,
        }
    }

    /// Return the next bit, most significant first. When the source is exhausted this sets
    /// the end of input flag and the returned bit is meaningless; check is_eof() after each call.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.count == 8 && !self.refill()? {
            return Ok(false);
        }
        let bit = (self.buffer >> (7 - self.count)) & 1;
        self.count += 1;
        Ok(bit == 1)
    }

    /// Return the next 8 bits as a byte. Same end of input rule as read_bit().
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut byte = 0_u8;
        for _ in 0..8 {
            byte = byte << 1 | self.read_bit()? as u8;
        }
        Ok(byte)
    }

    /// True once a refill has failed to obtain a new byte.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Number of bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Load the next byte into the buffer. Returns false if there is no more data.
    fn refill(&mut self) -> Result<bool> {
        let mut byte = [0_u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(false);
                }
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.buffer = byte[0];
        self.count = 0;
        self.bytes_read += 1;
        Ok(true)
    }
}
