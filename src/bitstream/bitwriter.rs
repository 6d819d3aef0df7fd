//! BitWriter: bit-granularity output over any byte sink.
//!
//! Bits are packed most significant bit first. A byte is pushed to the sink as soon as
//! its eighth bit is written, so the sink always holds every complete byte.

use std::io::Write;

use log::{trace, warn};

use crate::error::Result;

/// Writes single bits (and whole bytes) to a byte-oriented sink.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Handle to the output stream
    writer: W,
    /// Bits waiting to be written, packed from the most significant end.
    buffer: u8,
    /// Count of valid bits in the buffer (0-7).
    count: u8,
    /// Number of whole bytes handed to the sink so far.
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter. Wrap files in a BufWriter; each byte is written on its own.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            count: 0,
            bytes_written: 0,
        }
    }

    /// Put one bit on the stream.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.buffer |= 1 << (7 - self.count);
        }
        self.count += 1;
        if self.count == 8 {
            self.push_buffer()?;
        }
        Ok(())
    }

    /// Put a byte on the stream, most significant bit first.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        // Aligned writes skip the bit loop
        if self.count == 0 {
            self.buffer = byte;
            return self.push_buffer();
        }
        for i in 0..8 {
            self.write_bit((byte >> (7 - i)) & 1 == 1)?;
        }
        Ok(())
    }

    /// Put every bit of a slice on the stream, in order.
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Number of bits already written into the current (unfinished) byte.
    pub fn pending_bits(&self) -> u8 {
        self.count
    }

    /// Number of complete bytes written to the sink.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Zero-fill and write any partial byte, then flush the sink.
    pub fn finish(mut self) -> Result<u64> {
        self.flush_pending()?;
        self.writer.flush()?;
        Ok(self.bytes_written)
    }

    fn flush_pending(&mut self) -> Result<()> {
        if self.count > 0 {
            trace!("Zero filling {} trailing bits", 8 - self.count);
            self.push_buffer()?;
        }
        Ok(())
    }

    fn push_buffer(&mut self) -> Result<()> {
        self.writer.write_all(&[self.buffer])?;
        self.bytes_written += 1;
        self.buffer = 0;
        self.count = 0;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        // Still called on error paths; finish() leaves nothing to do here.
        if let Err(e) = self.flush_pending() {
            warn!("Could not write the final byte: {}", e);
        } else if let Err(e) = self.writer.flush() {
            warn!("Could not flush the output: {}", e);
        }
    }
}
