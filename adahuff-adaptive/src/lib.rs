//! # AdaHuff Adaptive: One-Pass Adaptive Huffman Coding
//!
//! This crate compresses a byte stream with a prefix code that is rebuilt
//! after every symbol. Encoder and decoder start from the same one-node tree
//! and apply the same update after each byte, so no frequency table is ever
//! transmitted.
//!
//! ## Wire Format
//!
//! - **No header**: the stream is nothing but MSB-first packed bits
//! - **Known byte**: its current root-to-leaf code
//! - **Unseen byte**: the escape code, then the 8 raw bits of the byte
//!   (the first byte of a stream is just its raw bits, because the escape
//!   code is empty while the tree is a single node)
//! - **End**: the input running out, or the escape code followed by a zero
//!   literal; the final byte is zero padded
//!
//! ## Example
//!
//! ```rust
//! use adahuff_adaptive::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Known Limitation
//!
//! A byte 0x00 whose first occurrence is not the first byte of the input is
//! written exactly like the end marker, and decoding stops there:
//!
//! ```rust
//! use adahuff_adaptive::{compress, decompress};
//!
//! let original = [0x41, 0x00, 0x41];
//! let decompressed = decompress(&compress(&original).unwrap()).unwrap();
//! assert_eq!(decompressed, [0x41]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod model;
mod stats;
mod walker;

pub use adahuff_core::{AdaHuffError, Result};
pub use config::{CodecConfig, EndMarker};
pub use decoder::{AdaptiveDecoder, DecodeState};
pub use encoder::AdaptiveEncoder;
pub use model::{ALPHABET_SIZE, AdaptiveModel, Side};
pub use stats::CodecStats;
pub use walker::{Resolution, TreeWalker};

use std::io::{Read, Write};

/// Compress data with the default configuration.
///
/// # Example
///
/// ```rust
/// use adahuff_adaptive::compress;
///
/// let data = vec![b'A'; 64];
/// let compressed = compress(&data).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, CodecConfig::DEFAULT)
}

/// Compress data with the given configuration.
pub fn compress_with(data: &[u8], config: CodecConfig) -> Result<Vec<u8>> {
    AdaptiveEncoder::new(config).encode_bytes(data)
}

/// Decompress data with the default configuration.
///
/// # Example
///
/// ```rust
/// use adahuff_adaptive::decompress;
///
/// // 'A' stored raw, then its one-bit code.
/// assert_eq!(decompress(&[0x41, 0x80]).unwrap(), b"AA");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, CodecConfig::DEFAULT)
}

/// Decompress data with the given configuration.
pub fn decompress_with(data: &[u8], config: CodecConfig) -> Result<Vec<u8>> {
    AdaptiveDecoder::new(config).decode_bytes(data)
}

/// Compress everything `reader` yields into `writer`.
///
/// Both sides are used sequentially; wrap files in `BufReader`/`BufWriter`.
pub fn encode_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: CodecConfig,
) -> Result<CodecStats> {
    AdaptiveEncoder::new(config).encode(reader, writer)
}

/// Decompress everything `reader` yields into `writer`.
pub fn decode_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: CodecConfig,
) -> Result<CodecStats> {
    AdaptiveDecoder::new(config).decode(reader, writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress(original).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_empty_input() {
        assert!(compress(b"").unwrap().is_empty());
        assert!(decompress(b"").unwrap().is_empty());
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress(&[0x41]).unwrap();
        assert_eq!(compressed, vec![0b0100_0001]);
        assert_eq!(decompress(&compressed).unwrap(), vec![0x41]);
    }

    #[test]
    fn test_repeating_pattern() {
        let original = vec![b'X'; 1000];
        let compressed = compress(&original).unwrap();
        assert!(compressed.len() < original.len() / 4);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_leading_zero_byte() {
        // 0x00 as the very first byte is stored raw, not as a marker.
        let original = [0x00, 0x07, 0x00, 0x00, 0x07];
        let compressed = compress(&original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_stream_roundtrip() {
        let original = b"streaming through Read and Write ".repeat(50);
        let mut compressed = Vec::new();
        let stats = encode_stream(&original[..], &mut compressed, CodecConfig::DEFAULT).unwrap();
        assert_eq!(stats.uncompressed_bytes, original.len() as u64);
        assert_eq!(stats.compressed_bytes, compressed.len() as u64);

        let mut decompressed = Vec::new();
        let stats = decode_stream(&compressed[..], &mut decompressed, CodecConfig::DEFAULT).unwrap();
        assert_eq!(decompressed, original);
        assert_eq!(stats.uncompressed_bytes, original.len() as u64);
    }
}
