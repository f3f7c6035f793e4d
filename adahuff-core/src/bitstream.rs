//! Bit-level I/O for the adaptive Huffman wire format.
//!
//! This module provides `BitWriter` and `BitReader`, which pack and unpack
//! individual bits to and from any byte sink or source.
//!
//! # Bit Ordering
//!
//! AdaHuff streams are MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of the first byte. A final partial byte is padded
//! with zero bits in its low-order positions.
//!
//! The reader is lazy: it pulls exactly one byte from the source whenever its
//! current byte is used up, and reports exhaustion as `Ok(None)` rather than
//! as an error, because running out of input is one of the two legitimate
//! end-of-stream signals.
//!
//! # Example
//!
//! ```
//! use adahuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bit(true).unwrap();
//! writer.write_bits(0b0110, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bit().unwrap(), Some(true));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b0110));
//! ```

use crate::error::Result;
use std::io::{self, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Byte currently being consumed.
    current: u8,
    /// Unread bits left in `current` (taken from the MSB side).
    bits_left: u8,
    /// Total bits read (for statistics).
    total_bits_read: u64,
    /// Set once the source has reported end of data.
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
            exhausted: false,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Get the number of whole bytes pulled from the source so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.total_bits_read.div_ceil(8)
    }

    /// Pull the next byte from the source, retrying interrupted reads.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read a single bit.
    ///
    /// Returns `Ok(None)` once the source has no more bytes to supply.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }

        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 != 0))
    }

    /// Read up to 32 bits, MSB-first.
    ///
    /// Returns `Ok(None)` if the source runs dry before `count` bits were
    /// read; the bits that were available are consumed regardless.
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }

    /// Read eight bits as one byte value.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.read_bits(8)?.map(|value| value as u8))
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Every completed byte is handed to the underlying writer immediately, so
/// wrap unbuffered sinks in a `BufWriter`. Call [`BitWriter::flush`] or
/// [`BitWriter::finish`] when done to write the padded partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, right-aligned.
    buffer: u8,
    /// Number of pending bits (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written, padding included.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Get the number of whole bytes handed to the writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.total_bits_written / 8
    }

    /// Number of bits waiting for the current byte to complete.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Number of zero bits [`BitWriter::flush`] would append right now.
    pub fn padding_bits(&self) -> u8 {
        if self.bits_in_buffer == 0 {
            0
        } else {
            8 - self.bits_in_buffer
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buffer = (self.buffer << 1) | bit as u8;
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        Ok(())
    }

    /// Write the low `count` bits of `value`, MSB-first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0)?;
        }
        Ok(())
    }

    /// Write a branch path, one bit per branch (`true` = 1).
    pub fn write_path(&mut self, path: &[bool]) -> Result<()> {
        for &bit in path {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Pad the partial byte with zeros, write it, and flush the writer.
    ///
    /// Nothing is written if no bits are pending.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            let byte = self.buffer << padding;
            self.writer.write_all(&[byte])?;
            self.total_bits_written += padding as u64;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Flush any pending bits and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_msb_first() {
        // 0b10110101 = 0xB5
        let mut reader = BitReader::new(Cursor::new(vec![0xB5]));

        let mut bits = Vec::new();
        while let Some(bit) = reader.read_bit().unwrap() {
            bits.push(bit);
        }
        assert_eq!(
            bits,
            vec![true, false, true, true, false, true, false, true]
        );
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let mut reader = BitReader::new(Cursor::new(vec![0xF0, 0x0F]));

        assert_eq!(reader.read_bits(4).unwrap(), Some(0xF));
        assert_eq!(reader.read_bits(8).unwrap(), Some(0x00)); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), Some(0xF));
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_bitreader_exhaustion_mid_read() {
        let mut reader = BitReader::new(Cursor::new(vec![0xAB]));

        assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
        assert_eq!(reader.read_byte().unwrap(), None);
        // Stays exhausted.
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn test_bitreader_empty_source() {
        let mut reader = BitReader::new(Cursor::new(Vec::<u8>::new()));
        assert_eq!(reader.read_byte().unwrap(), None);
        assert_eq!(reader.bytes_consumed(), 0);
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [true, false, true, true, false, true, false, true] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.pending_bits(), 0);
        assert_eq!(writer.finish().unwrap(), vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        assert_eq!(writer.pending_bits(), 1);
        assert_eq!(writer.padding_bits(), 7);

        writer.flush().unwrap();
        assert_eq!(writer.bits_written(), 8);
        assert_eq!(writer.get_ref(), &vec![0x80]);
    }

    #[test]
    fn test_bitwriter_flush_without_pending_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0x41, 8).unwrap();
        assert_eq!(writer.padding_bits(), 0);
        assert_eq!(writer.finish().unwrap(), vec![0x41]);

        let writer = BitWriter::new(Vec::new());
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn test_write_path() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_path(&[false, true, true]).unwrap();
        writer.write_bits(0b11001, 5).unwrap();
        assert_eq!(writer.finish().unwrap(), vec![0b0111_1001]);
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_bits(0b110011, 6).unwrap();
        let output = writer.finish().unwrap();

        let mut reader = BitReader::new(Cursor::new(output));
        assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
        assert_eq!(reader.read_bits(4).unwrap(), Some(0b1111));
        assert_eq!(reader.read_bits(2).unwrap(), Some(0b10));
        assert_eq!(reader.read_bits(6).unwrap(), Some(0b110011));
        // One padding bit remains.
        assert_eq!(reader.read_bit().unwrap(), Some(false));
        assert_eq!(reader.read_bit().unwrap(), None);
    }
}
